use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
pub use clap_complete::Shell;

use txcheck_rpc::RpcConfig;

pub const DEFAULT_FIXTURE: &str = "out.txt";

const LONG_ABOUT: &str = r#"txcheck confirms that a submitted transaction matches the shape recorded in a fixture file.

WORKFLOW:
    1. A submitter broadcasts a transaction and writes the fixture
    2. The transaction is mined
    3. txcheck reads the fixture, asks the node for the transaction and
       compares the two

FIXTURE FORMAT:
    Ten lines, in this order:
        transaction id
        miner input address
        miner input amount
        trader input address
        trader input amount
        miner change address
        miner change amount
        fee (the sign is ignored)
        block height
        block hash

CHECKS:
    block_height, block_hash, input_count (1), output_count (2),
    miner_output, trader_output, fee. Every check runs; amounts compare
    exactly.

EXIT CODES:
    0   every check passed
    1   one or more checks failed
    64  bad command-line arguments
    65  the fixture is missing or malformed
    69  the node answered for a different transaction
    74  the node could not be reached or returned an error
    75  the node did not answer in time

EXAMPLES:
    # Verify against a local regtest node
    txcheck verify --fixture out.txt

    # Another wallet, machine-readable output
    txcheck --rpc-url http://127.0.0.1:18443/wallet/Trader verify --json

    # Validate a fixture without a node
    txcheck check-fixture --fixture out.txt"#;

#[derive(Parser)]
#[command(name = "txcheck")]
#[command(author, version)]
#[command(about = "Verify a submitted transaction against a fixture and a live node")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Node RPC endpoint, including the /wallet/<name> path
    /// [env: TXCHECK_RPC_URL] [default: http://127.0.0.1:18443/wallet/Miner]
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// RPC user name [env: TXCHECK_RPC_USER] [default: alice]
    #[arg(long, global = true)]
    pub rpc_user: Option<String>,

    /// RPC password [env: TXCHECK_RPC_PASSWORD]
    #[arg(long, global = true)]
    pub rpc_password: Option<String>,

    /// Seconds to wait for the node, 0 waits indefinitely
    /// [env: TXCHECK_RPC_TIMEOUT] [default: 30]
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Output as JSON (shorthand for --format json)
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

impl Cli {
    /// Returns the effective output format, considering --json shorthand.
    pub fn effective_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }

    /// Environment and defaults first, then any flag given on the command line.
    pub fn rpc_config(&self) -> RpcConfig {
        let mut config = RpcConfig::from_env();
        if let Some(url) = &self.rpc_url {
            config = config.with_url(url);
        }
        if let Some(user) = &self.rpc_user {
            config = config.with_user(user);
        }
        if let Some(password) = &self.rpc_password {
            config = config.with_password(password);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout_secs(secs);
        }
        config
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Verify the fixture's transaction against the node
    #[command(long_about = r#"Verify the fixture's transaction against the node.

Loads the fixture, issues one gettransaction call and runs every check.
Nothing is sent to the node when the fixture is invalid.

EXAMPLES:
    txcheck verify
    txcheck verify --fixture /tmp/out.txt
    txcheck verify --json"#)]
    Verify {
        /// Path of the fixture file
        #[arg(short = 'F', long, env = "TXCHECK_FIXTURE", default_value = DEFAULT_FIXTURE)]
        fixture: PathBuf,
    },

    /// Load and validate a fixture without contacting the node
    CheckFixture {
        /// Path of the fixture file
        #[arg(short = 'F', long, env = "TXCHECK_FIXTURE", default_value = DEFAULT_FIXTURE)]
        fixture: PathBuf,
    },

    /// Generate shell completions
    #[command(long_about = r#"Generate shell completion scripts.

EXAMPLES:
    txcheck completions bash > /etc/bash_completion.d/txcheck
    txcheck completions zsh > ~/.zfunc/_txcheck"#)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verify_defaults() {
        let cli = Cli::try_parse_from(["txcheck", "verify"]).unwrap();
        match cli.command {
            Commands::Verify { ref fixture } => assert_eq!(fixture, &PathBuf::from("out.txt")),
            _ => panic!("expected verify"),
        }
        assert_eq!(cli.effective_format(), OutputFormat::Text);
    }

    #[test]
    fn test_json_shorthand() {
        let cli = Cli::try_parse_from(["txcheck", "verify", "--json"]).unwrap();
        assert_eq!(cli.effective_format(), OutputFormat::Json);
    }

    #[test]
    fn test_rpc_flags_build_config() {
        let cli = Cli::try_parse_from([
            "txcheck",
            "--rpc-url",
            "http://10.0.0.5:18443/wallet/Trader",
            "--rpc-user",
            "bob",
            "--rpc-password",
            "secret",
            "--timeout-secs",
            "0",
            "verify",
        ])
        .unwrap();
        let config = cli.rpc_config();
        assert_eq!(config.url(), "http://10.0.0.5:18443/wallet/Trader");
        assert_eq!(config.user(), "bob");
        assert_eq!(config.timeout(), None);
        assert_eq!(config.basic_auth_header(), "Basic Ym9iOnNlY3JldA==");
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["txcheck", "--format", "yaml", "verify"]).is_err());
    }
}
