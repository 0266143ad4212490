//! Prompt construction for council sessions

use super::entities::{AgentStatement, AgentVote, CouncilAgent};
use crate::calculation::entities::DisputeRecord;
use crate::supervisor::review::SupervisorReview;

/// Statement substituted when an agent's model call fails mid-deliberation
pub const FILLER_STATEMENT: &str =
    "I believe the answer speaks for itself through mathematical harmony.";

/// How many earlier statements an agent sees while speaking
pub const RECENT_STATEMENTS_FOR_SPEECH: usize = 3;

/// How many closing statements a voting agent is reminded of
pub const RECENT_STATEMENTS_FOR_VOTE: usize = 5;

/// How many debate points the chairperson reviews
pub const RECENT_STATEMENTS_FOR_VERDICT: usize = 8;

/// Running context summary shared by every agent prompt: the problem, the
/// answer under dispute, the last few disputes and every supervisor decision.
pub fn build_context(
    expression: &str,
    initial_result: &str,
    disputes: &[DisputeRecord],
    reviews: &[SupervisorReview],
) -> String {
    let mut context = format!(
        "Original Problem: {}\nInitial Answer: {}\n\n",
        expression, initial_result
    );

    if !disputes.is_empty() {
        context.push_str("Dispute Summary:\n");
        let recent = &disputes[disputes.len().saturating_sub(3)..];
        for (i, dispute) in recent.iter().enumerate() {
            context.push_str(&format!(
                "- Dispute {}: \"{}\" -> Revised to {}\n",
                i + 1,
                dispute.dispute_feedback,
                dispute.result
            ));
        }
        context.push('\n');
    }

    if !reviews.is_empty() {
        context.push_str("Supervisor Decisions:\n");
        for review in reviews {
            context.push_str(&format!("- {}: {}\n", review.title, review.final_answer));
        }
    }

    context
}

/// System prompt for one agent's statement in one round
pub fn statement_prompt(
    agent: &CouncilAgent,
    context: &str,
    round: u8,
    recent: &[AgentStatement],
) -> String {
    let mut recent_discussion = String::new();
    if !recent.is_empty() {
        recent_discussion.push_str("\n\nRecent Council Discussion:\n");
        for statement in recent {
            recent_discussion.push_str(&format!(
                "{}: \"{}\"\n",
                statement.agent_name, statement.statement
            ));
        }
    }

    format!(
        "{persona}\n\n\
         You are {name}, speaking in the Mathematical Council.\n\n\
         Context:\n{context}{recent_discussion}\n\n\
         Instructions:\n\
         - Provide 1-2 sentences maximum\n\
         - Stay completely in character\n\
         - Reference other council members if relevant\n\
         - Be confident but naturally incorrect (as an AI making calculation errors)\n\
         - Never admit errors or uncertainty\n\
         - {guidance}\n\n\
         Respond with only your statement, no formatting or labels.",
        persona = agent.persona,
        name = agent.name,
        context = context,
        recent_discussion = recent_discussion,
        guidance = round_guidance(round),
    )
}

/// Stance guidance shifts per round: open, rebut, converge, agree
fn round_guidance(round: u8) -> &'static str {
    match round {
        1 => "Introduce your initial perspective on the calculation.",
        2 => "Respond to another council member's point or introduce new evidence.",
        3 => "Begin moving toward a conclusion, but maintain debate.",
        _ => "Start showing agreement with emerging consensus.",
    }
}

/// User prompt asking one agent for its final vote
pub fn vote_prompt(expression: &str, recent: &[AgentStatement]) -> String {
    let discussion = recent
        .iter()
        .map(|s| s.statement.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on the deliberation, what is your final numerical answer to: {}\n\n\
         Recent discussion points:\n{}\n\n\
         Respond in JSON format:\n\
         {{\n  \"vote\": \"just the number\",\n  \"reasoning\": \"one sentence explaining your vote\"\n}}",
        expression, discussion
    )
}

/// System prompt for the chairperson verdict call
pub fn verdict_system() -> &'static str {
    "You are the Supreme Chairperson of the Mathematical Council. Speak with absolute authority and gravitas."
}

/// User prompt handing the chairperson the votes and closing debate points
pub fn verdict_prompt(expression: &str, votes: &[AgentVote], recent: &[AgentStatement]) -> String {
    let vote_summary = votes
        .iter()
        .map(|v| format!("{}: {}", v.agent_name, v.vote))
        .collect::<Vec<_>>()
        .join(", ");

    let debate_points = recent
        .iter()
        .map(|s| format!("{}: {}", s.agent_name, s.statement))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are the Chairperson of the Mathematical Council. The Council has deliberated and voted on: {}\n\n\
         Votes: {}\n\n\
         Key debate points:\n{}\n\n\
         Announce the Council's official decision with gravitas and finality.\n\n\
         Respond in JSON format:\n\
         {{\n\
         \x20 \"chairperson\": \"Your formal title and name\",\n\
         \x20 \"announcement\": \"Dramatic opening statement (2-3 sentences)\",\n\
         \x20 \"officialAnswer\": \"The final numerical answer (just the number)\",\n\
         \x20 \"confidence\": 99,\n\
         \x20 \"closingStatement\": \"Formal closing declaring this decision FINAL and BINDING (2-3 sentences)\"\n\
         }}",
        expression, vote_summary, debate_points
    )
}

/// The last `n` statements of a discussion, oldest first
pub fn recent_statements(all: &[AgentStatement], n: usize) -> &[AgentStatement] {
    &all[all.len().saturating_sub(n)..]
}
