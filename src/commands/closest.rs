use colored::Colorize;
use ncsbe_results::reports::tabulation::top_two;
use ncsbe_results::ElectionResults;

pub fn closest<A>(election: &ElectionResults<A>) {
    let Some(contest) = election.get_closest_race() else {
        println!("No contest with at least two candidates");
        return;
    };

    println!("🏁 Closest race: {}", contest.contest_name.bright_cyan().bold());
    if let Some((first, second)) = top_two(contest) {
        println!("  {:<40} {:>10}", first.candidate, first.votes);
        println!("  {:<40} {:>10}", second.candidate, second.votes);
        println!(
            "  {}: {}",
            "Margin".bright_white().bold(),
            (first.votes - second.votes).to_string().bright_yellow()
        );
    }
}
