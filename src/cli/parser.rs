use crate::core::add::EmployeeInput;
use crate::export::ExportFormat;
use crate::models::variant::Variant;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for shiftgrid
/// Plan one day of staff shifts on a half-hour grid, stored in SQLite
#[derive(Parser)]
#[command(
    name = "shiftgrid",
    version = env!("CARGO_PKG_VERSION"),
    about = "Daily shift planner: staff shifts and breaks on a half-hour occupancy grid",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the configured roster shape
    #[arg(global = true, long = "variant", value_enum)]
    pub variant: Option<Variant>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Employee form fields. On `edit`, omitted fields keep their current value;
/// pass an empty string to clear an optional one.
#[derive(Args, Debug, Clone, Default)]
pub struct EmployeeArgs {
    #[arg(long, help = "Employee name")]
    pub name: Option<String>,

    #[arg(long, help = "Role (first shift role on dual-shift rosters)")]
    pub role: Option<String>,

    #[arg(long = "in", help = "Shift start (HH:MM, default 10:00)")]
    pub start: Option<String>,

    #[arg(long = "out", help = "Shift end (HH:MM, default 18:00)")]
    pub end: Option<String>,

    #[arg(long = "break-start", help = "Break start (HH:MM, single-shift only)")]
    pub break_start: Option<String>,

    #[arg(long = "break-end", help = "Break end (HH:MM, single-shift only)")]
    pub break_end: Option<String>,

    #[arg(long = "role2", help = "Second shift role (dual-shift only)")]
    pub role2: Option<String>,

    #[arg(long = "in2", help = "Second shift start (HH:MM, default 18:00)")]
    pub start2: Option<String>,

    #[arg(long = "out2", help = "Second shift end (HH:MM, default 23:00)")]
    pub end2: Option<String>,
}

impl EmployeeArgs {
    pub fn to_input(&self) -> EmployeeInput {
        EmployeeInput {
            name: self.name.clone(),
            role: self.role.clone(),
            shift_start: self.start.clone(),
            shift_end: self.end.clone(),
            break_start: self.break_start.clone(),
            break_end: self.break_end.clone(),
            role2: self.role2.clone(),
            shift2_start: self.start2.clone(),
            shift2_end: self.end2.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add an employee to the roster
    Add {
        #[command(flatten)]
        fields: EmployeeArgs,
    },

    /// Replace an employee's shift data (id is kept)
    Edit {
        /// Employee id (see `list`)
        id: String,

        #[command(flatten)]
        fields: EmployeeArgs,
    },

    /// Delete an employee by id
    Del {
        /// Employee id (see `list`)
        id: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Show the occupancy grid
    Grid,

    /// List employees with ids and shift times
    List,

    /// Print a share token for the current roster
    Share,

    /// Replace the roster with the content of a share token
    Import {
        /// Token printed by `share`
        token: String,
    },

    /// Export the occupancy grid
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f', help = "Overwrite an existing file")]
        force: bool,
    },
}
