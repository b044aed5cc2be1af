use std::error::Error;
use std::io::{self, BufRead, IsTerminal, Write};
use std::net::Ipv4Addr;

use configuration::{LookupConfiguration, ResolverConfiguration};
use domain_name_resolver::{LimitExceeded, Resolver, ResolverLimits, Transport, UdpTransport};

use crate::cli_args::CliArgs;
use crate::command::Command;
use crate::logging::Logging;

mod cli_args;
mod command;
mod logging;
mod printer;

fn main() -> Result<(), Box<dyn Error>> {
    let args: CliArgs = argh::from_env();

    let lookup_config: LookupConfiguration = match configuration::get_config(args.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid configuration file {} ({}).", args.config.display(), e);
            std::process::exit(1);
        }
    };

    let logging = Logging::init(&lookup_config.log.level)?;

    let root_server = match select_root_server(args.root_server.as_deref(), lookup_config.resolver.root_server) {
        Ok(addr) => addr,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    };
    println!("Root DNS server is: {}", root_server);

    let transport = match UdpTransport::bind(lookup_config.resolver.timeout()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to open the UDP socket ({}).", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("queries leave from {:?}", transport.local_addr());

    let mut resolver = Resolver::new(transport, root_server)
        .with_port(lookup_config.resolver.port)
        .with_limits(resolver_limits(&lookup_config.resolver));

    run(&mut resolver, &logging)?;

    println!("Goodbye!");
    Ok(())
}

fn select_root_server(arg: Option<&str>, configured: Option<Ipv4Addr>) -> Result<Ipv4Addr, String> {
    match (arg, configured) {
        (Some(arg), _) => arg
            .parse::<Ipv4Addr>()
            .map_err(|e| format!("Invalid root server ({}: {}).", arg, e)),
        (None, Some(addr)) => Ok(addr),
        (None, None) => Err(String::from(
            "Invalid call. Usage:\n\tdnslookup rootServer\nwhere rootServer is the IP address (in dotted form) of the root DNS server to start the search at.",
        )),
    }
}

fn resolver_limits(c: &ResolverConfiguration) -> ResolverLimits {
    ResolverLimits {
        max_indirection: c.max_indirection,
        max_hops: c.max_hops,
        max_retries: c.max_retries,
        max_nesting: c.max_nesting,
    }
}

fn run<T: Transport>(resolver: &mut Resolver<T>, logging: &Logging) -> io::Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("DNSLOOKUP> ");
            stdout.flush()?;
        }

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        let command = match command::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Server(addr) => {
                resolver.set_root_server(addr);
                println!("Root DNS server is now: {}", addr);
            }
            Command::Trace(verbose) => {
                if let Err(e) = logging.set_verbose(verbose) {
                    tracing::warn!("failed to switch tracing: {}", e);
                }
                println!("Verbose tracing is now: {}", if verbose { "ON" } else { "OFF" });
            }
            Command::Lookup(query) => {
                let resolution = resolver.lookup(query.clone());
                report_limits(&resolution.limits);
                printer::print_results(&mut stdout, &query, &resolution.records)?;
            }
            Command::Dump => printer::print_cache(&mut stdout, resolver.cache())?,
        }
    }

    Ok(())
}

fn report_limits(limits: &[LimitExceeded]) {
    let mut reported: Vec<LimitExceeded> = Vec::with_capacity(limits.len());
    for limit in limits {
        if !reported.contains(limit) {
            eprintln!("{}", limit);
            reported.push(*limit);
        }
    }
}
