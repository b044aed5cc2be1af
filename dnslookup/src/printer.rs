use dns::ResourceRecord;
use domain_name_query_types::NameQuery;
use domain_name_resolver::ResultCache;
use std::collections::BTreeSet;
use std::io::{self, Write};

pub fn print_results<W: Write>(
    out: &mut W,
    query: &NameQuery,
    records: &BTreeSet<ResourceRecord>,
) -> io::Result<()> {
    if records.is_empty() {
        writeln!(out, "{:<30} {:<5} {:<8} {}", query.name, query.q_type, -1, "0.0.0.0")?;
    }
    for record in records {
        writeln!(
            out,
            "{:<30} {:<5} {:<8} {}",
            query.name,
            query.q_type,
            record.ttl(),
            record.value()
        )?;
    }

    Ok(())
}

pub fn print_cache<W: Write>(out: &mut W, cache: &ResultCache) -> io::Result<()> {
    let mut result = Ok(());
    cache.for_each(|query, records| {
        if result.is_ok() {
            result = print_results(out, query, records);
        }
    });
    result
}
