use colored::Colorize;
use ncsbe_results::reports::generator::generate_contest_report;
use ncsbe_results::ElectionResults;

pub fn results<A>(
    election: &ElectionResults<A>,
    contest: &str,
    county: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let contest_data = match election.get_contest(contest) {
        Some(c) => c,
        None => return Err(format!("Unknown contest: {}", contest).into()),
    };

    if json {
        let report = generate_contest_report(contest_data);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("📊 {}", contest.bright_cyan().bold());
    let winner = election.get_contest_winner(contest).map(|w| w.candidate.as_str());
    for candidate in election.get_candidates(contest) {
        let line = format!(
            "  {:<40} {:<6} {:>10} {:>7.2}%",
            candidate.candidate,
            candidate.party,
            election.get_candidate_vote_total(contest, &candidate.candidate),
            election.get_candidate_vote_percentage(contest, &candidate.candidate)
        );
        if Some(candidate.candidate.as_str()) == winner {
            println!("{}", line.bright_green().bold());
        } else {
            println!("{}", line);
        }
    }
    println!(
        "  {}: {}",
        "Total Votes".bright_white().bold(),
        election.get_total_votes_for_contest(contest).to_string().bright_yellow()
    );

    if let Some(county) = county {
        let county_data = match election.get_county_results(contest, county) {
            Some(c) => c,
            None => return Err(format!("No results for county {} in {}", county, contest).into()),
        };
        println!(
            "\n🗺️  {} ({} precincts)",
            county.bright_cyan(),
            county_data.precincts.len()
        );
        for precinct in &county_data.precincts {
            let tally: Vec<String> = precinct
                .candidates
                .iter()
                .map(|c| format!("{}={}", c.candidate, c.votes))
                .collect();
            println!("  {:<12} {}", precinct.precinct, tally.join(", "));
        }
    } else {
        println!(
            "  {}: {}",
            "Counties".bright_white().bold(),
            election.list_counties(contest).join(", ")
        );
    }

    Ok(())
}
