use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for fieldops
/// Time tracking, job orders and approvals for field-service cleaning crews
#[derive(Parser)]
#[command(
    name = "fieldops",
    version = env!("CARGO_PKG_VERSION"),
    about = "Local-first time tracking, job orders and approvals for field-service crews",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the session snapshot file
    #[arg(global = true, long = "session")]
    pub session: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(flatten)]
    pub location: LocationArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Position reported by the device for transitions that record one.
#[derive(Args, Debug, Clone, Default)]
pub struct LocationArgs {
    #[arg(global = true, long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    #[arg(global = true, long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Accuracy in metres
    #[arg(global = true, long, default_value_t = 25.0)]
    pub acc: f64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create the administrator on an empty database
    Setup {
        #[arg(long)]
        pin: String,
    },

    /// Log in as a user
    Login {
        user_id: i64,

        #[arg(long)]
        pin: String,
    },

    /// Log out (running timers keep running)
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Manage users (executive only)
    User {
        #[command(subcommand)]
        action: UserCmd,
    },

    /// Manage work areas
    Area {
        #[command(subcommand)]
        action: AreaCmd,
    },

    /// Start, stop or inspect the running timer
    Timer {
        #[command(subcommand)]
        action: TimerCmd,
    },

    /// Job orders
    Order {
        #[command(subcommand)]
        action: OrderCmd,
    },

    /// Time entries
    Entry {
        #[command(subcommand)]
        action: EntryCmd,
    },

    /// Today's totals for the logged-in user
    Summary,

    /// Approve and publish entries and orders
    Review {
        #[command(subcommand)]
        action: ReviewCmd,
    },

    /// Tasks
    Task {
        #[command(subcommand)]
        action: TaskCmd,
    },

    /// Clients and their portal tokens
    Client {
        #[command(subcommand)]
        action: ClientCmd,
    },

    /// Stored photos and signatures
    File {
        #[command(subcommand)]
        action: FileCmd,
    },

    /// Runtime settings (rounding, geo, theme)
    Setting {
        #[command(subcommand)]
        action: SettingCmd,
    },

    /// Export entries (CSV) or the full data set (JSON)
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter CSV by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, help = "Only entries of this user (CSV)")]
        user: Option<i64>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Write a JSON backup of every collection
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Replace the database content with a backup
    Restore {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Print the client portal feed as JSON
    Portal {
        #[arg(long)]
        token: String,

        #[arg(long, value_name = "YYYY-MM-DD")]
        from: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        to: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum UserCmd {
    List,
    Add {
        name: String,
        #[arg(long, default_value = "field-worker")]
        role: String,
        #[arg(long)]
        pin: String,
    },
    Role {
        id: i64,
        role: String,
    },
    Pin {
        id: i64,
        #[arg(long)]
        pin: String,
    },
    Del {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum AreaCmd {
    List,
    Add {
        name: String,
        #[arg(long, default_value = "#14b8a6")]
        color: String,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    Del {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum TimerCmd {
    Start {
        #[arg(long)]
        area: i64,
        #[arg(long, default_value = "")]
        note: String,
        /// Record the position even when the geo setting is off
        #[arg(long)]
        geo: bool,
    },
    Stop {
        #[arg(long)]
        geo: bool,
    },
    Status,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OrderPlanArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub area: Option<i64>,
    #[arg(long = "assign")]
    pub assigned_to: Option<i64>,
    #[arg(long = "start-plan", value_name = "YYYY-MM-DD HH:MM")]
    pub start_plan: Option<String>,
    #[arg(long = "end-plan", value_name = "YYYY-MM-DD HH:MM")]
    pub end_plan: Option<String>,
    #[arg(long)]
    pub instructions: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long = "site-lat", allow_hyphen_values = true)]
    pub site_lat: Option<f64>,
    #[arg(long = "site-lon", allow_hyphen_values = true)]
    pub site_lon: Option<f64>,
}

#[derive(Subcommand)]
pub enum OrderCmd {
    List {
        #[arg(long)]
        mine: bool,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    Show {
        id: i64,
    },
    Add {
        #[command(flatten)]
        plan: OrderPlanArgs,
    },
    Edit {
        id: i64,
        #[command(flatten)]
        plan: OrderPlanArgs,
    },
    Del {
        id: i64,
    },
    Start {
        id: i64,
    },
    Stop {
        id: i64,
    },
    /// Record the missing entry of a finished order
    Record {
        id: i64,
    },
    Sign {
        id: i64,
        #[arg(long)]
        file: i64,
    },
    Photo {
        id: i64,
        #[arg(long)]
        file: i64,
    },
}

#[derive(Subcommand)]
pub enum EntryCmd {
    List {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        user: Option<i64>,
        /// Per-day totals instead of single entries
        #[arg(long)]
        daily: bool,
    },
    Edit {
        id: i64,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        note: Option<String>,
        #[arg(long)]
        user: Option<i64>,
        #[arg(long)]
        area: Option<i64>,
    },
    Del {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ReviewCmd {
    List,
    Set {
        /// entry | order
        kind: String,
        id: i64,
        #[arg(long, conflicts_with = "unapprove")]
        approve: bool,
        #[arg(long)]
        unapprove: bool,
        #[arg(long, conflicts_with = "unpublish")]
        publish: bool,
        #[arg(long)]
        unpublish: bool,
    },
}

#[derive(Subcommand)]
pub enum TaskCmd {
    List,
    Add {
        title: String,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        area: Option<i64>,
        #[arg(long = "assign")]
        assigned_to: Option<i64>,
    },
    Done {
        id: i64,
    },
    Del {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ClientCmd {
    List,
    Add {
        name: String,
        #[arg(long, value_delimiter = ',')]
        areas: Vec<i64>,
    },
    Rename {
        id: i64,
        name: String,
    },
    Areas {
        id: i64,
        #[arg(long, value_delimiter = ',')]
        areas: Vec<i64>,
    },
    Del {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum FileCmd {
    /// Store a data URL (data:<mime>;base64,...)
    Add {
        #[arg(long)]
        data: String,
    },
    Show {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum SettingCmd {
    List,
    Set { key: String, value: String },
}
