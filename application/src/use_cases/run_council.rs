//! Run Council use case
//!
//! Orchestrates the full Mathematical Council session: seat a random roster,
//! run sequential deliberation rounds, collect votes and synthesize the
//! chairperson verdict. Every event is pushed to the caller's channel the
//! moment it exists; a session runs 60-90 seconds and the client needs
//! continuous liveness signals.
//!
//! Agents speak strictly one at a time. Sequential ordering is what lets an
//! agent's prompt include the statements made just before it in the same
//! round; fanning the calls out would break that causality.

use crate::config::CouncilPacing;
use crate::ports::completion_gateway::{CompletionGateway, CompletionRequest};
use calcouncil_domain::council::events::RosterEntry;
use calcouncil_domain::council::parsing::{
    self, FAILED_VOTE_REASONING, UNPARSEABLE_VOTE_REASONING,
};
use calcouncil_domain::council::prompts::{
    self, FILLER_STATEMENT, RECENT_STATEMENTS_FOR_SPEECH, RECENT_STATEMENTS_FOR_VOTE,
    RECENT_STATEMENTS_FOR_VERDICT,
};
use calcouncil_domain::council::selection;
use calcouncil_domain::{
    AgentStatement, AgentVote, CouncilAgent, CouncilEvent, CouncilOutcome, CouncilRunStats,
    DeliberationRound, DisputeRecord, FinalVerdict, Message, Model, SupervisorReview, TokenUsage,
};
use chrono::Utc;
use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Errors that abort a council session before it produces events
#[derive(Error, Debug)]
pub enum CouncilError {
    #[error("Council deliberation requires a final supervisor review")]
    MissingFinalReview,

    #[error("Expression is required")]
    MissingExpression,
}

/// Input for the RunCouncil use case
#[derive(Debug, Clone)]
pub struct CouncilInput {
    pub expression: String,
    pub initial_result: String,
    pub disputes: Vec<DisputeRecord>,
    pub supervisor_reviews: Vec<SupervisorReview>,
}

/// Use case for running one streamed council session
pub struct RunCouncilUseCase {
    gateway: Arc<dyn CompletionGateway>,
    pacing: CouncilPacing,
}

impl RunCouncilUseCase {
    /// Model used for agent statements and votes
    const AGENT_MODEL: Model = Model::Llama31Instruct8B;
    /// Model used for the chairperson verdict
    const VERDICT_MODEL: Model = Model::Llama33Instruct70B;
    const VERDICT_TEMPERATURE: f32 = 0.8;
    const MAX_TOKENS: u32 = 300;

    pub fn new(gateway: Arc<dyn CompletionGateway>, pacing: CouncilPacing) -> Self {
        Self { gateway, pacing }
    }

    /// Run the session to completion, pushing every event to `events`.
    ///
    /// All randomness (roster, names, round count, speaking orders) flows
    /// through `rng`. After the precondition check nothing aborts the
    /// session: individual call failures degrade to filler statements,
    /// fallback votes and the canned verdict.
    pub async fn run<R: Rng + Send>(
        &self,
        input: CouncilInput,
        rng: &mut R,
        events: &mpsc::Sender<CouncilEvent>,
    ) -> Result<CouncilOutcome, CouncilError> {
        if input.expression.trim().is_empty() {
            return Err(CouncilError::MissingExpression);
        }
        if !input.supervisor_reviews.iter().any(|r| r.is_final) {
            return Err(CouncilError::MissingFinalReview);
        }

        let started = Instant::now();
        let session_millis = Utc::now().timestamp_millis();
        let session_id = format!("council_{}", session_millis);
        let mut usage = TokenUsage::default();

        // Phase 1: seat the council
        let agents = selection::select_agents(rng, session_millis);
        info!(
            session_id = %session_id,
            agents = agents.len(),
            "Council convened"
        );
        emit(
            events,
            CouncilEvent::AgentsSelected {
                session_id: session_id.clone(),
                agents: agents.iter().map(RosterEntry::from).collect(),
            },
        )
        .await;

        let context = prompts::build_context(
            &input.expression,
            &input.initial_result,
            &input.disputes,
            &input.supervisor_reviews,
        );

        // Phase 2: deliberation
        let round_count = selection::choose_round_count(rng);
        let mut all_statements: Vec<AgentStatement> = Vec::new();
        let mut deliberation: Vec<DeliberationRound> = Vec::new();

        for round in 1..=round_count {
            emit(events, CouncilEvent::RoundStart { round }).await;
            let mut round_statements = Vec::with_capacity(agents.len());

            for agent in selection::speaking_order(&agents, rng) {
                emit(
                    events,
                    CouncilEvent::StatementStart {
                        agent_id: agent.id.clone(),
                        agent_name: agent.name.clone(),
                    },
                )
                .await;

                let statement = self
                    .agent_statement(&agent, &context, round, &all_statements, &mut usage)
                    .await;
                all_statements.push(statement.clone());
                round_statements.push(statement.clone());

                emit(events, CouncilEvent::StatementComplete { statement }).await;
                pace(self.pacing.statement_delay).await;
            }

            deliberation.push(DeliberationRound {
                round_number: round,
                statements: round_statements,
            });
            emit(events, CouncilEvent::RoundComplete { round }).await;
            pace(self.pacing.round_delay).await;
        }

        emit(events, CouncilEvent::DeliberationComplete {}).await;

        // Phase 3: voting, in roster order
        emit(events, CouncilEvent::VotingStarted {}).await;
        let mut votes: Vec<AgentVote> = Vec::with_capacity(agents.len());

        for agent in &agents {
            let vote = self
                .agent_vote(agent, &input, &all_statements, &mut usage)
                .await;
            votes.push(vote.clone());
            emit(events, CouncilEvent::Vote { vote }).await;
            pace(self.pacing.vote_delay).await;
        }

        emit(events, CouncilEvent::VotingComplete {}).await;

        // Phase 4: chairperson verdict
        let verdict = self
            .chairperson_verdict(&input, &votes, &all_statements, &mut usage)
            .await;
        emit(
            events,
            CouncilEvent::Verdict {
                verdict: verdict.clone(),
            },
        )
        .await;

        let outcome = CouncilOutcome {
            session_id,
            metadata: CouncilRunStats::new(
                started.elapsed().as_secs_f64(),
                usage,
                agents.len(),
                round_count,
            ),
            agents,
            deliberation,
            votes,
            final_verdict: verdict,
        };

        emit(
            events,
            CouncilEvent::Complete {
                outcome: Box::new(outcome.clone()),
            },
        )
        .await;

        info!(
            duration = %outcome.metadata.total_duration,
            tokens = outcome.metadata.total_tokens,
            "Council adjourned"
        );
        Ok(outcome)
    }

    /// One statement; failure degrades to the filler line
    async fn agent_statement(
        &self,
        agent: &CouncilAgent,
        context: &str,
        round: u8,
        all_statements: &[AgentStatement],
        usage: &mut TokenUsage,
    ) -> AgentStatement {
        let recent = prompts::recent_statements(all_statements, RECENT_STATEMENTS_FOR_SPEECH);
        let request = CompletionRequest::new(
            Self::AGENT_MODEL,
            vec![Message::system(prompts::statement_prompt(
                agent, context, round, recent,
            ))],
            agent.temperature,
        )
        .with_max_tokens(Self::MAX_TOKENS);

        let statement = match self.gateway.complete(request).await {
            Ok(completion) => {
                usage.add(completion.usage);
                completion.text.trim().to_string()
            }
            Err(error) => {
                warn!(agent = %agent.name, %error, "Statement call failed, using filler");
                FILLER_STATEMENT.to_string()
            }
        };

        AgentStatement {
            agent_id: agent.id.clone(),
            agent_name: agent.name.clone(),
            statement,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// One vote; malformed replies and failed calls both fall back to the
    /// session's initial result, with distinct reasoning strings
    async fn agent_vote(
        &self,
        agent: &CouncilAgent,
        input: &CouncilInput,
        all_statements: &[AgentStatement],
        usage: &mut TokenUsage,
    ) -> AgentVote {
        let recent = prompts::recent_statements(all_statements, RECENT_STATEMENTS_FOR_VOTE);
        let request = CompletionRequest::new(
            Self::AGENT_MODEL,
            vec![
                Message::system(agent.persona),
                Message::user(prompts::vote_prompt(&input.expression, recent)),
            ],
            agent.temperature,
        )
        .with_max_tokens(Self::MAX_TOKENS);

        match self.gateway.complete(request).await {
            Ok(completion) => {
                usage.add(completion.usage);
                match parsing::parse_vote(&completion.text) {
                    Some((vote, reasoning)) => AgentVote {
                        agent_id: agent.id.clone(),
                        agent_name: agent.name.clone(),
                        vote,
                        reasoning,
                    },
                    None => {
                        warn!(agent = %agent.name, "Vote reply unparseable, using fallback");
                        parsing::fallback_vote(
                            agent,
                            &input.initial_result,
                            UNPARSEABLE_VOTE_REASONING,
                        )
                    }
                }
            }
            Err(error) => {
                warn!(agent = %agent.name, %error, "Vote call failed, using fallback");
                parsing::fallback_vote(agent, &input.initial_result, FAILED_VOTE_REASONING)
            }
        }
    }

    /// The chairperson call; the session always ends with some verdict
    async fn chairperson_verdict(
        &self,
        input: &CouncilInput,
        votes: &[AgentVote],
        all_statements: &[AgentStatement],
        usage: &mut TokenUsage,
    ) -> FinalVerdict {
        let recent = prompts::recent_statements(all_statements, RECENT_STATEMENTS_FOR_VERDICT);
        let request = CompletionRequest::new(
            Self::VERDICT_MODEL,
            vec![
                Message::system(prompts::verdict_system()),
                Message::user(prompts::verdict_prompt(&input.expression, votes, recent)),
            ],
            Self::VERDICT_TEMPERATURE,
        )
        .with_max_tokens(Self::MAX_TOKENS);

        match self.gateway.complete(request).await {
            Ok(completion) => {
                usage.add(completion.usage);
                parsing::parse_verdict(&completion.text).unwrap_or_else(|| {
                    warn!("Verdict reply unparseable, using canned verdict");
                    parsing::fallback_verdict(votes.first(), &input.initial_result)
                })
            }
            Err(error) => {
                warn!(%error, "Verdict call failed, using canned verdict");
                parsing::fallback_verdict(votes.first(), &input.initial_result)
            }
        }
    }
}

/// Push an event, ignoring a dropped receiver: a client that disconnected
/// mid-session simply stops hearing the rest
async fn emit(events: &mpsc::Sender<CouncilEvent>, event: CouncilEvent) {
    let _ = events.send(event).await;
}

async fn pace(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedGateway;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn final_review() -> SupervisorReview {
        SupervisorReview {
            level: 3,
            title: "Chief Executive of Mathematical Operations".to_string(),
            agent_name: None,
            explanation: "synergy".to_string(),
            final_answer: "5".to_string(),
            recommendation: "circle back".to_string(),
            confidence: Some(99),
            closing_statement: Some("Meeting adjourned.".to_string()),
            is_final: true,
        }
    }

    fn council_input() -> CouncilInput {
        CouncilInput {
            expression: "2 + 2".to_string(),
            initial_result: "5".to_string(),
            disputes: vec![],
            supervisor_reviews: vec![final_review()],
        }
    }

    async fn run_session(
        gateway: ScriptedGateway,
        seed: u64,
    ) -> (CouncilOutcome, Vec<CouncilEvent>) {
        let use_case = RunCouncilUseCase::new(Arc::new(gateway), CouncilPacing::none());
        let (tx, mut rx) = mpsc::channel(256);
        let mut rng = StdRng::seed_from_u64(seed);

        let outcome = use_case.run(council_input(), &mut rng, &tx).await.unwrap();
        drop(tx);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        (outcome, events)
    }

    #[tokio::test]
    async fn test_event_ordering() {
        let (outcome, events) = run_session(
            ScriptedGateway::repeating(r#"{"vote": "4", "reasoning": "obvious"}"#),
            42,
        )
        .await;

        let types: Vec<&str> = events.iter().map(|e| e.event_type()).collect();
        assert_eq!(types.first(), Some(&"agents_selected"));
        assert_eq!(types.last(), Some(&"complete"));

        let position = |t: &str| types.iter().position(|x| *x == t).unwrap();
        assert!(position("agents_selected") < position("round_start"));
        assert!(position("deliberation_complete") < position("voting_started"));
        assert!(position("voting_complete") < position("verdict"));
        assert!(position("verdict") < position("complete"));

        let round_starts = types.iter().filter(|t| **t == "round_start").count();
        assert_eq!(round_starts as u8, outcome.metadata.rounds_completed);
        assert!((3..=5).contains(&outcome.metadata.rounds_completed));

        let vote_events = types.iter().filter(|t| **t == "vote").count();
        assert_eq!(vote_events, outcome.agents.len());
        assert!(outcome.agents.len() == 5 || outcome.agents.len() == 6);
    }

    #[tokio::test]
    async fn test_statements_grouped_by_round() {
        let (outcome, _) = run_session(ScriptedGateway::repeating("The sevens align."), 7).await;

        assert_eq!(
            outcome.deliberation.len() as u8,
            outcome.metadata.rounds_completed
        );
        for round in &outcome.deliberation {
            assert_eq!(round.statements.len(), outcome.agents.len());
        }
        // Prose votes fall back to the initial result
        for vote in &outcome.votes {
            assert_eq!(vote.vote, "5");
            assert_eq!(vote.reasoning, UNPARSEABLE_VOTE_REASONING);
        }
    }

    #[tokio::test]
    async fn test_missing_final_review_rejected_before_any_event() {
        let use_case = RunCouncilUseCase::new(
            Arc::new(ScriptedGateway::new(vec![])),
            CouncilPacing::none(),
        );
        let (tx, mut rx) = mpsc::channel(16);
        let mut rng = StdRng::seed_from_u64(0);

        let mut input = council_input();
        input.supervisor_reviews = vec![SupervisorReview {
            is_final: false,
            level: 1,
            ..final_review()
        }];

        let error = use_case.run(input, &mut rng, &tx).await.unwrap_err();
        assert!(matches!(error, CouncilError::MissingFinalReview));

        drop(tx);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_total_outage_still_completes_with_fallbacks() {
        // Empty script with no repeat: every call fails
        let (outcome, events) = run_session(ScriptedGateway::new(vec![]), 3).await;

        for round in &outcome.deliberation {
            for statement in &round.statements {
                assert_eq!(statement.statement, FILLER_STATEMENT);
            }
        }
        for vote in &outcome.votes {
            assert_eq!(vote.vote, "5");
            assert_eq!(vote.reasoning, FAILED_VOTE_REASONING);
        }
        assert_eq!(
            outcome.final_verdict.chairperson,
            "Grand Chancellor of Mathematical Truth"
        );
        assert_eq!(outcome.final_verdict.official_answer, "5");
        assert_eq!(events.last().unwrap().event_type(), "complete");
    }

    #[tokio::test]
    async fn test_verdict_parsed_from_chairperson_reply() {
        // The last call is the verdict; everything before it gets the repeat
        let gateway = ScriptedGateway::repeating(
            r#"{"chairperson": "Supreme Chairperson Verity Cross", "announcement": "It is decided.", "officialAnswer": "4", "confidence": 99, "closingStatement": "FINAL."}"#,
        );
        let (outcome, _) = run_session(gateway, 11).await;

        assert_eq!(outcome.final_verdict.official_answer, "4");
        assert_eq!(
            outcome.final_verdict.chairperson,
            "Supreme Chairperson Verity Cross"
        );
    }

    #[tokio::test]
    async fn test_dropped_receiver_does_not_abort_the_session() {
        let use_case = RunCouncilUseCase::new(
            Arc::new(ScriptedGateway::repeating("4")),
            CouncilPacing::none(),
        );
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let mut rng = StdRng::seed_from_u64(5);
        let outcome = use_case.run(council_input(), &mut rng, &tx).await.unwrap();
        assert!(!outcome.final_verdict.official_answer.is_empty());
    }
}
