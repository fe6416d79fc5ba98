use clap::{Parser, Subcommand};
use s3link_allocator::service::{DEFAULT_MAX_ATTEMPTS, DEFAULT_STATE_PREFIX};
use s3link_core::RedirectTemplate;
use s3link_generator::random::DEFAULT_LENGTH;

pub const BUCKET_ENV: &str = "S3_BUCKET";
pub const REGION_ENV: &str = "AWS_REGION";
pub const ENDPOINT_ENV: &str = "S3LINK_ENDPOINT";
pub const STATE_PREFIX_ENV: &str = "S3LINK_STATE_PREFIX";
pub const LINK_PREFIX_ENV: &str = "S3LINK_LINK_PREFIX";
pub const REDIRECT_FORMAT_ENV: &str = "S3LINK_REDIRECT_FORMAT";
pub const IDENTIFIER_LENGTH_ENV: &str = "S3LINK_IDENTIFIER_LENGTH";
pub const MAX_ATTEMPTS_ENV: &str = "S3LINK_MAX_ATTEMPTS";

pub const DEFAULT_REDIRECT_FORMAT: &str = "%s";

#[derive(Debug, Parser)]
#[command(name = "s3link", version, about = "Allocate short redirect links in an S3 bucket")]
pub struct CLI {
    #[arg(long, env = BUCKET_ENV)]
    pub bucket: String,

    #[arg(long, env = REGION_ENV)]
    pub region: String,

    /// Custom endpoint for S3-compatible services
    #[arg(long, env = ENDPOINT_ENV)]
    pub endpoint: Option<String>,

    #[arg(long, env = STATE_PREFIX_ENV, default_value = DEFAULT_STATE_PREFIX)]
    pub state_prefix: String,

    #[arg(long, env = LINK_PREFIX_ENV, default_value = "")]
    pub link_prefix: String,

    /// Redirect target template with a single %s placeholder
    #[arg(long, env = REDIRECT_FORMAT_ENV, default_value = DEFAULT_REDIRECT_FORMAT)]
    pub redirect_format: RedirectTemplate,

    #[arg(long, env = IDENTIFIER_LENGTH_ENV, default_value_t = DEFAULT_LENGTH)]
    pub identifier_length: usize,

    #[arg(long, env = MAX_ATTEMPTS_ENV, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the short code for KEY, allocating one if needed
    Get { key: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: [&str; 5] = ["s3link", "--bucket", "links", "--region", "ap-northeast-1"];

    #[test]
    fn parses_get() {
        let cli = CLI::try_parse_from(BASE.iter().copied().chain(["get", "cats"])).unwrap();

        let Command::Get { key } = &cli.command;
        assert_eq!(key, "cats");
        assert_eq!(cli.state_prefix, "state/");
        assert_eq!(cli.link_prefix, "");
        assert_eq!(cli.identifier_length, 6);
        assert_eq!(cli.redirect_format.as_str(), "%s");
    }

    #[test]
    fn parses_redirect_format() {
        let args = BASE
            .iter()
            .copied()
            .chain(["--redirect-format", "https://x/?s=%s", "get", "cats"]);
        let cli = CLI::try_parse_from(args).unwrap();

        assert_eq!(cli.redirect_format.format("cats"), "https://x/?s=cats");
    }

    #[test]
    fn rejects_malformed_redirect_format() {
        let args = BASE
            .iter()
            .copied()
            .chain(["--redirect-format", "https://x/", "get", "cats"]);
        assert!(CLI::try_parse_from(args).is_err());
    }

    #[test]
    fn rejects_missing_key_and_unknown_subcommand() {
        assert!(CLI::try_parse_from(BASE.iter().copied().chain(["get"])).is_err());
        assert!(CLI::try_parse_from(BASE.iter().copied().chain(["put", "cats"])).is_err());
        assert!(CLI::try_parse_from(BASE).is_err());
    }
}
