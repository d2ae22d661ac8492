use clap::Parser;
use double_hash_table::config::{parse_load_factor, parse_max_elements};
use double_hash_table::{DeleteAccounting, Mode, PartialConfig, Policy, ReorganizeMode, TombstoneProbe};

#[derive(Parser, Debug)]
#[command(
    name = "dhtable",
    about = "Interactive double-hashing table of usernames",
    version
)]
pub struct Cli {
    /// Maximum number of usernames the table accepts (prompted if absent).
    #[arg(long, value_parser = parse_max_elements)]
    pub max_elements: Option<usize>,

    /// Target load factor used to size the table (prompted if absent).
    #[arg(long, value_parser = parse_load_factor)]
    pub load_factor: Option<f64>,

    /// Output mode (prompted if absent).
    #[arg(long, value_enum, ignore_case = true)]
    pub mode: Option<Mode>,

    #[arg(long, value_enum, default_value_t)]
    pub delete_accounting: DeleteAccounting,

    #[arg(long, value_enum, default_value_t)]
    pub reorganize: ReorganizeMode,

    #[arg(long, value_enum, default_value_t)]
    pub probe: TombstoneProbe,
}

impl Cli {
    pub fn partial_config(&self) -> PartialConfig {
        PartialConfig {
            max_elements: self.max_elements,
            load_factor: self.load_factor,
            mode: self.mode,
            policy: Policy {
                delete: self.delete_accounting,
                reorganize: self.reorganize,
                probe: self.probe,
            },
        }
    }
}
