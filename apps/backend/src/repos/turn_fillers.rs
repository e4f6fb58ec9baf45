//! A turn's candidate definitions.

use sea_orm::ConnectionTrait;

use crate::adapters::turn_fillers_sea as turn_fillers_adapter;
use crate::entities::turn_definition_fillers;
use crate::errors::domain::DomainError;
use crate::repos::content::decode_values;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnFiller {
    pub id: i64,
    pub turn_id: i64,
    pub template_id: i64,
    pub values: Vec<String>,
    pub is_dictionary: bool,
    pub supplier_id: Option<i64>,
    pub selector_id: Option<i64>,
}

impl TryFrom<turn_definition_fillers::Model> for TurnFiller {
    type Error = DomainError;

    fn try_from(model: turn_definition_fillers::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            turn_id: model.turn_id,
            template_id: model.template_id,
            values: decode_values(model.filler, model.id)?,
            is_dictionary: model.is_dictionary,
            supplier_id: model.supplier_id,
            selector_id: model.selector_id,
        })
    }
}

/// Where a new candidate row comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillerSource {
    Dictionary,
    Supplier(i64),
    Generated,
}

pub async fn add_filler<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
    template_id: i64,
    values: Vec<String>,
    source: FillerSource,
) -> Result<TurnFiller, DomainError> {
    let (is_dictionary, supplier_id) = match source {
        FillerSource::Dictionary => (true, None),
        FillerSource::Supplier(id) => (false, Some(id)),
        FillerSource::Generated => (false, None),
    };
    let dto = turn_fillers_adapter::TurnFillerCreate {
        turn_id,
        template_id,
        values,
        is_dictionary,
        supplier_id,
    };
    let row = turn_fillers_adapter::create_turn_filler(conn, dto).await?;
    TurnFiller::try_from(row)
}

pub async fn find_by_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<Vec<TurnFiller>, DomainError> {
    turn_fillers_adapter::find_by_turn(conn, turn_id)
        .await?
        .into_iter()
        .map(TurnFiller::try_from)
        .collect()
}

pub async fn count_by_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<usize, DomainError> {
    let n = turn_fillers_adapter::count_by_turn(conn, turn_id).await?;
    Ok(usize::try_from(n).unwrap_or(usize::MAX))
}

pub async fn claim_selection<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
    filler_id: i64,
    selector_id: i64,
) -> Result<bool, DomainError> {
    Ok(turn_fillers_adapter::claim_selection(conn, turn_id, filler_id, selector_id).await?)
}
