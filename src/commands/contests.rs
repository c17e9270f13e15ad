use colored::Colorize;
use ncsbe_results::ElectionResults;

pub fn contests<A>(election: &ElectionResults<A>) {
    let names = election.list_contests();
    println!(
        "📋 {} contests for election {}",
        names.len().to_string().bright_yellow(),
        election.election_date().bright_cyan()
    );

    for name in names {
        println!(
            "  {} ({} candidates, {} votes)",
            name.green(),
            election.list_candidates(name).len(),
            election.get_total_votes_for_contest(name)
        );
    }
}
