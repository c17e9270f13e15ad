use colored::Colorize;
use ncsbe_results::ElectionResults;

pub fn candidate<A>(election: &ElectionResults<A>, name: &str) {
    if !election.has_candidate(name) {
        eprintln!("❌ No results for candidate: {}", name);
        return;
    }

    println!("👤 {}", name.bright_cyan().bold());
    for contest in election.get_contests_by_candidate(name) {
        let Some(entry) = contest.candidate(name) else {
            continue;
        };
        println!(
            "  {:<50} {:<6} {:>10} {:>7.2}%",
            contest.contest_name.green(),
            entry.party,
            entry.votes,
            election.get_candidate_vote_percentage(&contest.contest_name, name)
        );
    }
}
