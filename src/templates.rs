//! Built-in templates for scaffolded and generated files.
//!
//! Every template can be overridden per project by dropping a file with the
//! same name into the templates directory (`scripts/templates` by default).
//! Bodies use the placeholder syntax of [`crate::template`]; CMake's own
//! variables are written as `$${VAR}`.
//!
//! ## Templates
//!
//! - `header.txt`, `source.txt` - plain header / source file
//! - `class_header.txt`, `class_source.txt` - class skeleton
//! - `test.txt` - GoogleTest source
//! - `api_header.txt`, `composite_header.txt` - generated public headers
//! - `cmake_*.txt` - generated build scripts

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Header,
    Source,
    ClassHeader,
    ClassSource,
    Test,
    ApiHeader,
    CompositeHeader,
    CMakeModule,
    CMakeShared,
    CMakeStatic,
    CMakeExecutable,
    CMakeDependency,
    CMakeTests,
    CMakeIndex,
}

impl TemplateKind {
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateKind::Header => "header.txt",
            TemplateKind::Source => "source.txt",
            TemplateKind::ClassHeader => "class_header.txt",
            TemplateKind::ClassSource => "class_source.txt",
            TemplateKind::Test => "test.txt",
            TemplateKind::ApiHeader => "api_header.txt",
            TemplateKind::CompositeHeader => "composite_header.txt",
            TemplateKind::CMakeModule => "cmake_module.txt",
            TemplateKind::CMakeShared => "cmake_shared.txt",
            TemplateKind::CMakeStatic => "cmake_static.txt",
            TemplateKind::CMakeExecutable => "cmake_executable.txt",
            TemplateKind::CMakeDependency => "cmake_dependency.txt",
            TemplateKind::CMakeTests => "cmake_tests.txt",
            TemplateKind::CMakeIndex => "cmake_index.txt",
        }
    }

    fn builtin(self) -> &'static str {
        match self {
            TemplateKind::Header => HEADER,
            TemplateKind::Source => SOURCE,
            TemplateKind::ClassHeader => CLASS_HEADER,
            TemplateKind::ClassSource => CLASS_SOURCE,
            TemplateKind::Test => TEST,
            TemplateKind::ApiHeader => API_HEADER,
            TemplateKind::CompositeHeader => COMPOSITE_HEADER,
            TemplateKind::CMakeModule => CMAKE_MODULE,
            TemplateKind::CMakeShared => CMAKE_SHARED,
            TemplateKind::CMakeStatic => CMAKE_STATIC,
            TemplateKind::CMakeExecutable => CMAKE_EXECUTABLE,
            TemplateKind::CMakeDependency => CMAKE_DEPENDENCY,
            TemplateKind::CMakeTests => CMAKE_TESTS,
            TemplateKind::CMakeIndex => CMAKE_INDEX,
        }
    }
}

/// Template body for `kind`: the project override if one exists, else the built-in.
pub fn load(templates_dir: &Path, kind: TemplateKind) -> io::Result<Cow<'static, str>> {
    let path = templates_dir.join(kind.file_name());
    if path.exists() {
        Ok(Cow::Owned(fs::read_to_string(path)?))
    } else {
        Ok(Cow::Borrowed(kind.builtin()))
    }
}

macro_rules! banner {
    () => {
        "/**
 * @file ${FILE_NAME}
 *
${NOTICE} * This code is distributed as part of the ${PROJECT_NAME} project.
 */
"
    };
}

const HEADER: &str = concat!(
    banner!(),
    "
#ifndef ${GUARD}
#define ${GUARD}

#include \"${MODULE}API.hpp\"

#endif
"
);

const SOURCE: &str = concat!(
    banner!(),
    "
#include \"${INCLUDE_PATH}\"
"
);

const CLASS_HEADER: &str = concat!(
    banner!(),
    "
#ifndef ${GUARD}
#define ${GUARD}

#include \"${MODULE}API.hpp\"

namespace seedengine {

    class ENGINE_API ${CLASS_NAME} {
    public:
        ${CLASS_NAME}();
        ~${CLASS_NAME}();
    };

}

#endif
"
);

const CLASS_SOURCE: &str = concat!(
    banner!(),
    "
#include \"${INCLUDE_PATH}\"

namespace seedengine {

    ${CLASS_NAME}::${CLASS_NAME}() {}

    ${CLASS_NAME}::~${CLASS_NAME}() {}

}
"
);

const TEST: &str = concat!(
    banner!(),
    "
#include <gtest/gtest.h>

#include \"${MODULE}.hpp\"

TEST(${DOMAIN}${MODULE}, ${TEST_NAME}) {
    SUCCEED();
}
"
);

const API_HEADER: &str = concat!(
    banner!(),
    "
#ifndef ${GUARD}
#define ${GUARD}

${INCLUDES}

#ifndef ${EXPORT_MACRO}_EXPORT_API
    #if BUILD_SHARED_LIBS
        #if defined(_WIN32) || defined(__CYGWIN__) || defined(_MSC_VER)
            #define ${EXPORT_MACRO}_EXPORT_API __declspec(dllexport)
            #define ${EXPORT_MACRO}_IMPORT_API __declspec(dllimport)
            #define ${EXPORT_MACRO}_HIDDEN_API
        #elif defined(__GNUC__) && __GNUC__ >= 4
            #define ${EXPORT_MACRO}_EXPORT_API __attribute__((visibility(\"default\")))
            #define ${EXPORT_MACRO}_IMPORT_API __attribute__((visibility(\"default\")))
            #define ${EXPORT_MACRO}_HIDDEN_API __attribute__((visibility(\"hidden\")))
        #else
            #define ${EXPORT_MACRO}_EXPORT_API
            #define ${EXPORT_MACRO}_IMPORT_API
            #define ${EXPORT_MACRO}_HIDDEN_API
        #endif
    #else
        #define ${EXPORT_MACRO}_EXPORT_API
        #define ${EXPORT_MACRO}_IMPORT_API
        #define ${EXPORT_MACRO}_HIDDEN_API
    #endif
#endif

#ifndef ENGINE_API
    #ifdef ${EXPORT_MACRO}_EXPORT
        #define ENGINE_API ${EXPORT_MACRO}_EXPORT_API
    #else
        #define ENGINE_API ${EXPORT_MACRO}_IMPORT_API
    #endif
#endif

#endif
"
);

const COMPOSITE_HEADER: &str = concat!(
    banner!(),
    "
#ifndef ${GUARD}
#define ${GUARD}

#include \"${MODULE}API.hpp\"

${INCLUDES}

#ifdef ENGINE_API
    #undef ENGINE_API
#endif

#endif
"
);

const CMAKE_MODULE: &str = "# Generated by seed from ${DOMAIN}/${MODULE}/Module.json. Do not edit.

${TARGET_DECLARATION}

target_include_directories(${TARGET_NAME}
    PUBLIC
        $${CMAKE_CURRENT_SOURCE_DIR}/Public
    PRIVATE
        $${CMAKE_CURRENT_SOURCE_DIR}/Private
)

target_compile_definitions(${TARGET_NAME} PRIVATE ${EXPORT_MACRO}_EXPORT)

${DEPENDENCIES}

${CUSTOM_INSTRUCTIONS}

target_sources(${TARGET_NAME}
    PRIVATE
${SOURCE_FILES}
    PUBLIC
${HEADER_FILES}
)
${TESTS}";

const CMAKE_SHARED: &str = "add_library(${TARGET_NAME} SHARED)
target_compile_definitions(${TARGET_NAME} PUBLIC BUILD_SHARED_LIBS=1)";

const CMAKE_STATIC: &str = "add_library(${TARGET_NAME} STATIC)";

const CMAKE_EXECUTABLE: &str = "add_executable(${TARGET_NAME})
set_target_properties(${TARGET_NAME} PROPERTIES
    OUTPUT_NAME ${OUTPUT_NAME}
    RUNTIME_OUTPUT_DIRECTORY_DEBUG $${CMAKE_SOURCE_DIR}/${BIN_DIR}/Debug
    RUNTIME_OUTPUT_DIRECTORY_RELEASE $${CMAKE_SOURCE_DIR}/${BIN_DIR}/Release
)";

const CMAKE_DEPENDENCY: &str = "target_link_libraries(${TARGET_NAME} PUBLIC ${DEPENDENCY_TARGET})";

const CMAKE_TESTS: &str = "
add_executable(${TARGET_NAME}-tests)
target_sources(${TARGET_NAME}-tests
    PRIVATE
${TEST_FILES}
)
target_link_libraries(${TARGET_NAME}-tests PRIVATE ${TARGET_NAME} GTest::gtest_main)
add_test(NAME ${TARGET_NAME}-tests COMMAND ${TARGET_NAME}-tests)
";

const CMAKE_INDEX: &str = "# Generated by seed from the module manifests. Do not edit.

find_package(GTest CONFIG)
enable_testing()

${SUBDIRECTORIES}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_used_without_override() {
        let dir = tempfile::tempdir().unwrap();
        let body = load(dir.path(), TemplateKind::CMakeStatic).unwrap();
        assert!(matches!(body, Cow::Borrowed(_)));
        assert!(body.contains("STATIC"));
    }

    #[test]
    fn test_project_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cmake_static.txt"), "add_library(${TARGET_NAME})").unwrap();
        let body = load(dir.path(), TemplateKind::CMakeStatic).unwrap();
        assert_eq!(body, "add_library(${TARGET_NAME})");
    }

    #[test]
    fn test_banner_prefix_is_shared() {
        for kind in [
            TemplateKind::Header,
            TemplateKind::Source,
            TemplateKind::ClassHeader,
            TemplateKind::ClassSource,
            TemplateKind::Test,
            TemplateKind::ApiHeader,
            TemplateKind::CompositeHeader,
        ] {
            assert!(kind.builtin().starts_with(banner!()), "{:?}", kind);
        }
    }
}
