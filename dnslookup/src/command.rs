use domain_name_query_types::{NameQuery, QType};
use std::net::Ipv4Addr;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Lookup(NameQuery),
    Trace(bool),
    Server(Ipv4Addr),
    Dump,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid call. Format:\n\tlookup hostName [type]")]
    LookupUsage,
    #[error("Invalid query type. Must be one of:\n\tA, AAAA, NS, MX, CNAME, SOA")]
    QueryType,
    #[error("Invalid call. Format:\n\ttrace on|off")]
    TraceUsage,
    #[error("Invalid call. Format:\n\tserver IP")]
    ServerUsage,
    #[error("Invalid root server ({0}).")]
    ServerAddress(String),
    #[error("Invalid command. Valid commands are:\n\tlookup fqdn [type]\n\ttrace on|off\n\tserver IP\n\tdump\n\tquit")]
    Unknown,
}

/// Parses one input line. Comments start at `#`; a line with nothing
/// left gives `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return Ok(None);
    }

    let args: Vec<&str> = line.split_whitespace().collect();
    let command = match args[0].to_ascii_lowercase().as_str() {
        "quit" | "exit" => Command::Quit,
        "dump" => Command::Dump,
        "server" => match args.as_slice() {
            [_, addr] => {
                let addr: Ipv4Addr = addr
                    .parse()
                    .map_err(|_| CommandError::ServerAddress(addr.to_string()))?;
                Command::Server(addr)
            }
            _ => return Err(CommandError::ServerUsage),
        },
        "trace" => match args.as_slice() {
            [_, arg] if arg.eq_ignore_ascii_case("on") => Command::Trace(true),
            [_, arg] if arg.eq_ignore_ascii_case("off") => Command::Trace(false),
            _ => return Err(CommandError::TraceUsage),
        },
        "lookup" | "l" => match args.as_slice() {
            [_, host] => Command::Lookup(NameQuery::a_record(host)),
            [_, host, q_type] => {
                let q_type: QType = q_type.parse().map_err(|_| CommandError::QueryType)?;
                Command::Lookup(NameQuery::new(host, q_type))
            }
            _ => return Err(CommandError::LookupUsage),
        },
        _ => return Err(CommandError::Unknown),
    };

    Ok(Some(command))
}
