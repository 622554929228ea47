use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Schema-driven fake data generator and mock REST API server
#[derive(Parser, Debug, Clone)]
#[command(name = "tyche", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate fake instances and emit them as a JSON array
    Generate {
        /// Schema reference, e.g. 'schemas.yaml:User'
        schema: String,

        /// Number of instances to generate
        #[arg(short, long, env = "TYCHE_COUNT")]
        count: Option<u32>,

        /// Path to write the JSON to instead of stdout
        #[arg(short, long)]
        output_file: Option<PathBuf>,

        /// Locale for realistic values (e.g. 'en', 'fr_FR', 'ja_JP')
        #[arg(short, long, env = "TYCHE_LOCALE")]
        locale: Option<String>,

        /// Seed for reproducible output
        #[arg(short, long, env = "TYCHE_SEED")]
        seed: Option<u64>,
    },

    /// Generate fake instances and serve them via a mock REST API
    Serve {
        /// Schema reference, e.g. 'schemas.yaml:User'
        schema: String,

        /// Number of instances to populate the store with
        #[arg(short, long, env = "TYCHE_COUNT")]
        count: Option<u32>,

        /// Locale for realistic values (e.g. 'en', 'fr_FR', 'ja_JP')
        #[arg(short, long, env = "TYCHE_LOCALE")]
        locale: Option<String>,

        /// Seed for reproducible output
        #[arg(short, long, env = "TYCHE_SEED")]
        seed: Option<u64>,

        /// Host to bind the server to
        #[arg(long, env = "TYCHE_HOST")]
        host: Option<String>,

        /// Port to run the server on
        #[arg(long, env = "TYCHE_PORT")]
        port: Option<u16>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::parse_from(["tyche", "generate", "schemas.yaml:User"]);
        let Command::Generate {
            schema,
            count,
            output_file,
            locale,
            seed,
        } = cli.command
        else {
            panic!("expected generate command");
        };
        assert_eq!(schema, "schemas.yaml:User");
        assert!(count.is_none());
        assert!(output_file.is_none());
        assert!(locale.is_none());
        assert!(seed.is_none());
    }

    #[test]
    fn test_generate_with_args() {
        let cli = Cli::parse_from([
            "tyche",
            "generate",
            "schemas.yaml:User",
            "--count",
            "5",
            "--output-file",
            "out.json",
            "--locale",
            "fr_FR",
            "--seed",
            "42",
        ]);
        let Command::Generate {
            count,
            output_file,
            locale,
            seed,
            ..
        } = cli.command
        else {
            panic!("expected generate command");
        };
        assert_eq!(count, Some(5));
        assert_eq!(output_file, Some(PathBuf::from("out.json")));
        assert_eq!(locale.as_deref(), Some("fr_FR"));
        assert_eq!(seed, Some(42));
    }

    #[test]
    fn test_serve_with_args() {
        let cli = Cli::parse_from([
            "tyche",
            "serve",
            "schemas.yaml:User",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
        ]);
        let Command::Serve { host, port, .. } = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(host.as_deref(), Some("0.0.0.0"));
        assert_eq!(port, Some(9000));
    }
}
