//! # seed CLI Entry Point
//!
//! Parses arguments with clap and routes each command to its handler in
//! [`seedtool::commands`].
//!
//! ## Command Structure
//!
//! - **Scaffolding**: `add module|class|header|source|test`, `fill`
//! - **Dependencies**: `add dep`, `remove dep`, `list dep|ref`
//! - **Generation**: `regen`, `regenall`
//! - **Build**: `build`, `run`
//! - **Inspection**: `list domain|module`, `todo`

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};

use seedtool::build::BuildOptions;
use seedtool::commands;
use seedtool::commands::add::FileKind;
use seedtool::manifest::BuildTarget;
use seedtool::project::Project;

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Seed Engine module and build tool", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a module, a file inside a module, or a dependency edge
    Add {
        #[command(subcommand)]
        op: AddOp,
    },
    /// Remove a dependency edge
    Remove {
        #[command(subcommand)]
        op: RemoveOp,
    },
    /// Configure and build with cmake (Debug and Release unless one is selected)
    Build {
        /// Remove build outputs and reconfigure first
        #[arg(long)]
        clean: bool,
        /// Run the editor after building
        #[arg(long)]
        exec: bool,
        /// Run the test suite after building
        #[arg(long)]
        test: bool,
        /// Build the Debug configuration
        #[arg(long)]
        debug: bool,
        /// Build the Release configuration
        #[arg(long)]
        release: bool,
    },
    /// Run the built editor or the test suite
    Run {
        /// Use the Debug configuration instead of Release
        #[arg(long)]
        debug: bool,
        /// Run the test suite instead of the editor
        #[arg(long)]
        test: bool,
    },
    /// Regenerate the build script and headers of one module
    Regen { domain: String, module: String },
    /// Regenerate every module and the source index
    Regenall,
    /// List domains, modules, dependencies, or references
    List {
        #[command(subcommand)]
        op: ListOp,
    },
    /// Fill empty .hpp/.cpp files from templates
    Fill,
    /// Collect TODO comments into ToDoLists.txt
    Todo,
    /// Generate shell completions
    Completion { shell: Shell },
}

#[derive(Subcommand)]
enum AddOp {
    /// Create a new module with its directories and manifest
    Module {
        domain: String,
        name: String,
        /// Build target of the module
        #[arg(long, value_enum, default_value = "shared")]
        target: TargetArg,
    },
    /// Add a class (public header and private source)
    Class {
        domain: String,
        module: String,
        name: String,
        /// Subfolder under Public/ and Private/ (e.g. Render/Passes)
        #[arg(long)]
        folder: Option<String>,
    },
    /// Add a public header
    Header {
        domain: String,
        module: String,
        name: String,
        #[arg(long)]
        folder: Option<String>,
    },
    /// Add a private source file
    Source {
        domain: String,
        module: String,
        name: String,
        #[arg(long)]
        folder: Option<String>,
    },
    /// Add a GoogleTest source
    Test {
        domain: String,
        module: String,
        name: String,
    },
    /// Make a module depend on another
    Dep {
        domain: String,
        module: String,
        dep_domain: String,
        dep_module: String,
    },
}

#[derive(Subcommand)]
enum RemoveOp {
    /// Remove a dependency from a module
    Dep {
        domain: String,
        module: String,
        dep_domain: String,
        dep_module: String,
    },
}

#[derive(Subcommand)]
enum ListOp {
    /// List domains
    Domain,
    /// List the modules of a domain
    Module { domain: String },
    /// List the dependencies of a module
    Dep {
        domain: String,
        module: String,
        #[arg(short, long)]
        recursive: bool,
    },
    /// List the modules of the same domain that depend on a module
    Ref {
        domain: String,
        module: String,
        #[arg(short, long)]
        recursive: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    Shared,
    Static,
    Executable,
}

impl From<TargetArg> for BuildTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Shared => BuildTarget::Shared,
            TargetArg::Static => BuildTarget::Static,
            TargetArg::Executable => BuildTarget::Executable,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completion { shell } = &cli.command {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
        return Ok(());
    }

    let project = Project::discover()?;

    match cli.command {
        Commands::Add { op } => match op {
            AddOp::Module {
                domain,
                name,
                target,
            } => commands::add::handle_add_module(&project, &domain, &name, target.into()),
            AddOp::Class {
                domain,
                module,
                name,
                folder,
            } => commands::add::handle_add_file(
                &project,
                FileKind::Class,
                &domain,
                &module,
                &name,
                folder.as_deref(),
            ),
            AddOp::Header {
                domain,
                module,
                name,
                folder,
            } => commands::add::handle_add_file(
                &project,
                FileKind::Header,
                &domain,
                &module,
                &name,
                folder.as_deref(),
            ),
            AddOp::Source {
                domain,
                module,
                name,
                folder,
            } => commands::add::handle_add_file(
                &project,
                FileKind::Source,
                &domain,
                &module,
                &name,
                folder.as_deref(),
            ),
            AddOp::Test {
                domain,
                module,
                name,
            } => commands::add::handle_add_file(
                &project,
                FileKind::Test,
                &domain,
                &module,
                &name,
                None,
            ),
            AddOp::Dep {
                domain,
                module,
                dep_domain,
                dep_module,
            } => commands::add::handle_add_dep(&project, &domain, &module, &dep_domain, &dep_module),
        },

        Commands::Remove {
            op:
                RemoveOp::Dep {
                    domain,
                    module,
                    dep_domain,
                    dep_module,
                },
        } => commands::remove::handle_remove_dep(&project, &domain, &module, &dep_domain, &dep_module),

        Commands::Build {
            clean,
            exec,
            test,
            debug,
            release,
        } => commands::build::handle_build(
            &project,
            BuildOptions {
                clean,
                exec,
                test,
                debug,
                release,
            },
        ),

        Commands::Run { debug, test } => commands::build::handle_run(&project, debug, test),

        Commands::Regen { domain, module } => {
            commands::regen::handle_regen(&project, &domain, &module)
        }

        Commands::Regenall => commands::regen::handle_regenall(&project),

        Commands::List { op } => match op {
            ListOp::Domain => commands::list::handle_list_domains(&project),
            ListOp::Module { domain } => commands::list::handle_list_modules(&project, &domain),
            ListOp::Dep {
                domain,
                module,
                recursive,
            } => commands::list::handle_list_deps(&project, &domain, &module, recursive),
            ListOp::Ref {
                domain,
                module,
                recursive,
            } => commands::list::handle_list_refs(&project, &domain, &module, recursive),
        },

        Commands::Fill => commands::add::handle_fill(&project),

        Commands::Todo => commands::todo::handle_todo(&project),

        Commands::Completion { .. } => Ok(()),
    }
}
