use ncsbe_results::ElectionResults;

/// Write the whole dataset to stdout as JSON.
pub fn dump<A>(election: &ElectionResults<A>, pretty: bool) -> serde_json::Result<()> {
    let Some(dataset) = election.get_dataset() else {
        return Ok(());
    };
    let out = if pretty {
        serde_json::to_string_pretty(dataset.as_ref())?
    } else {
        serde_json::to_string(dataset.as_ref())?
    };
    println!("{}", out);
    Ok(())
}
