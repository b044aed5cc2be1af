use std::path::PathBuf;
use argh::FromArgs;

fn default_config_path () -> PathBuf {
    PathBuf::from("./dnslookup.toml")
}

#[derive(Debug, FromArgs)]
#[argh(description = "Iterative DNS lookups, starting every search at a root name server")]
pub struct CliArgs {
    #[argh(
        positional,
        description = "IPv4 address of the root name server, overrides the config file"
    )]
    pub root_server: Option<String>,

    #[argh(
        option,
        description = "config file path, default: './dnslookup.toml'",
        default = "default_config_path()"
    )]
    pub config: PathBuf,
}
