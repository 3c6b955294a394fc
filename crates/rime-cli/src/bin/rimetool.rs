use std::path::Path;

use clap::{Args, Parser, Subcommand};

use rime_cli::commands::dict_ops::IndexOptions;
use rime_cli::commands::{acronym_ops, config_ops, dict_ops, extract_ops};
use rime_cli::trace_init::init_tracing;
use rime_core::group::GroupPolicy;
use rime_core::normalize::{CutoffRule, FilterRule};

#[derive(Parser)]
#[command(name = "rimetool", about = "Rime dictionary maintenance tool")]
struct Cli {
    /// Settings file (defaults to the embedded settings)
    #[arg(long, global = true)]
    config: Option<String>,
    /// Directory relative dictionary paths resolve against
    #[arg(long, env = "RIME_DIR", global = true)]
    rime_dir: Option<String>,
    /// Write JSON trace events to DIR/rimetool-trace.jsonl instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct RuleArgs {
    /// Text casing filter
    #[arg(long, default_value = "all-lower")]
    filter: FilterRule,
    /// Separator removal after concatenation
    #[arg(long, default_value = "remove-both")]
    cutoff: CutoffRule,
    /// Skip rows without a code field instead of aborting
    #[arg(long)]
    skip_malformed: bool,
}

impl RuleArgs {
    fn options(&self) -> IndexOptions {
        IndexOptions {
            filter: self.filter,
            cutoff: self.cutoff,
            skip_malformed: self.skip_malformed,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print the normalization keys of a dictionary
    Keys {
        /// Dictionary file
        dict_file: String,
        #[command(flatten)]
        rule: RuleArgs,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print key groups worth reviewing (key, text, code per row)
    Groups {
        /// Dictionary file
        dict_file: String,
        #[command(flatten)]
        rule: RuleArgs,
        /// Which groups to keep
        #[arg(long, default_value = "ambiguous-or-capital")]
        policy: GroupPolicy,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print keys never seen capitalized, with their lowercase row
    Safe {
        /// Dictionary file
        dict_file: String,
        /// Separator removal after concatenation
        #[arg(long, default_value = "remove-both")]
        cutoff: CutoffRule,
        /// Skip rows without a code field instead of aborting
        #[arg(long)]
        skip_malformed: bool,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Expand acronym definitions into dictionary rows
    Acronym {
        /// Acronym source file (default: [acronym].source)
        #[arg(long)]
        input: Option<String>,
        /// Output file, `-` for stdout (default: [acronym].output)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Set the weight of every data row in place
    Weight {
        /// Dictionary file
        dict_file: String,
        /// New weight
        #[arg(allow_negative_numbers = true)]
        weight: i64,
    },
    /// Extract headwords from a JSON dictionary dump
    Extract {
        /// JSON dump (default: [extract].input)
        #[arg(long)]
        input: Option<String>,
        /// Word list (default: [extract].output)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Load every configured table and print its size
    Tables,
    /// Look up a row in a configured table
    Lookup {
        /// Table name from the settings
        table: String,
        /// Display text
        text: String,
        /// Encoding
        #[arg(default_value = "")]
        code: String,
    },
    /// Print the embedded default settings
    SettingsExport,
    /// Validate a settings file
    SettingsValidate {
        /// Settings TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_dir.as_deref().map(Path::new));
    let settings = || config_ops::load_settings(cli.config.as_deref(), cli.rime_dir.as_deref());

    match &cli.command {
        Command::Keys {
            dict_file,
            rule,
            output,
        } => dict_ops::keys(dict_file, &rule.options(), output.as_deref()),
        Command::Groups {
            dict_file,
            rule,
            policy,
            output,
        } => dict_ops::groups(dict_file, &rule.options(), *policy, output.as_deref()),
        Command::Safe {
            dict_file,
            cutoff,
            skip_malformed,
            output,
        } => {
            let opts = IndexOptions {
                filter: FilterRule::CapitalSplit,
                cutoff: *cutoff,
                skip_malformed: *skip_malformed,
            };
            dict_ops::safe(dict_file, &opts, output.as_deref());
        }
        Command::Acronym { input, output } => {
            acronym_ops::expand(&settings(), input.as_deref(), output.as_deref())
        }
        Command::Weight { dict_file, weight } => dict_ops::weight(dict_file, *weight),
        Command::Extract { input, output } => {
            extract_ops::extract_words(&settings(), input.as_deref(), output.as_deref())
        }
        Command::Tables => dict_ops::tables(&settings()),
        Command::Lookup { table, text, code } => {
            dict_ops::lookup(&settings(), table, text, code)
        }
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(file),
    }
}
