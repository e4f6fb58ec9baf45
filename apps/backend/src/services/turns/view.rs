//! Read models returned by the turn engine.

use serde::Serialize;

use crate::domain::fillers::{candidate_order, render_definition};
use crate::domain::{PlayerAction, TurnRole, TurnState};
use crate::entities::words::LexicalClass;
use crate::errors::domain::DomainError;
use crate::repos::content::Template;
use crate::repos::turn_fillers::TurnFiller;
use crate::repos::turns::Turn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnSummary {
    pub id: i64,
    pub match_id: i64,
    pub seq: i32,
    pub word_id: i64,
    pub selector_id: i64,
    pub state: TurnState,
}

impl From<&Turn> for TurnSummary {
    fn from(turn: &Turn) -> Self {
        Self {
            id: turn.id,
            match_id: turn.match_id,
            seq: turn.seq,
            word_id: turn.word_id,
            selector_id: turn.selector_id,
            state: turn.state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateView {
    pub id: i64,
    pub definition: String,
    pub slot_classes: Vec<LexicalClass>,
}

impl From<&Template> for TemplateView {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id,
            definition: template.definition.clone(),
            slot_classes: template.slot_classes.clone(),
        }
    }
}

/// Who wrote a candidate and who picked it; only shown once a selection exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub is_dictionary: bool,
    pub supplier_id: Option<i64>,
    pub selector_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub id: i64,
    pub definition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

/// A turn as one participant should see it right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerTurn {
    pub turn: TurnSummary,
    pub role: TurnRole,
    pub action: PlayerAction,
    pub template: TemplateView,
    /// Empty while suppliers are still writing
    pub candidates: Vec<Candidate>,
}

impl PlayerTurn {
    pub fn build(
        turn: &Turn,
        role: TurnRole,
        action: PlayerAction,
        template: &Template,
        rows: &[TurnFiller],
    ) -> Result<Self, DomainError> {
        let candidates = match action {
            PlayerAction::Supply | PlayerAction::AwaitSupplies => Vec::new(),
            PlayerAction::Select => candidates(turn.id, template, rows, false)?,
            PlayerAction::ViewOutcome => candidates(turn.id, template, rows, true)?,
        };
        Ok(Self {
            turn: TurnSummary::from(turn),
            role,
            action,
            template: TemplateView::from(template),
            candidates,
        })
    }

    /// The dictionary candidate, when outcomes are revealed.
    pub fn dictionary_candidate(&self) -> Option<&Candidate> {
        self.candidates
            .iter()
            .find(|c| c.outcome.is_some_and(|o| o.is_dictionary))
    }
}

fn candidates(
    turn_id: i64,
    template: &Template,
    rows: &[TurnFiller],
    reveal: bool,
) -> Result<Vec<Candidate>, DomainError> {
    let mut order: Vec<i64> = rows.iter().map(|r| r.id).collect();
    candidate_order(turn_id, &mut order);

    let mut out = Vec::with_capacity(rows.len());
    for id in order {
        let Some(row) = rows.iter().find(|r| r.id == id) else {
            continue;
        };
        out.push(Candidate {
            id: row.id,
            definition: render_definition(&template.definition, &row.values)?,
            outcome: reveal.then_some(Outcome {
                is_dictionary: row.is_dictionary,
                supplier_id: row.supplier_id,
                selector_id: row.selector_id,
            }),
        });
    }
    Ok(out)
}
