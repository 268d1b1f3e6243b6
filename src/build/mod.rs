mod clean;
mod cmake;
pub mod runner;

pub use clean::clean;
pub use cmake::{
    BuildOptions, BuildReport, Profile, build, executable_path, profile_build_dir,
    run_executable, run_tests,
};
pub use runner::{Runner, SystemRunner};
