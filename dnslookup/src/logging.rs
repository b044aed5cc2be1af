use std::error::Error;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, Registry};

const VERBOSE_FILTER: &str = "debug";

/// The global subscriber, with a filter that `trace on|off` can swap.
pub struct Logging {
    handle: reload::Handle<EnvFilter, Registry>,
    level: String,
}

impl Logging {
    pub fn init(level: &str) -> Result<Self, Box<dyn Error>> {
        let (filter, handle) = reload::Layer::<EnvFilter, Registry>::new(EnvFilter::try_new(level)?);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?;

        Ok(Self {
            handle,
            level: level.to_string(),
        })
    }

    pub fn set_verbose(&self, verbose: bool) -> Result<(), reload::Error> {
        let directives = if verbose { VERBOSE_FILTER } else { self.level.as_str() };
        self.handle.reload(EnvFilter::new(directives))
    }
}
