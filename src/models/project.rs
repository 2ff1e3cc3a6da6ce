use super::{to_timestamp, to_u64, TokenAmount};
use crate::error::{LedgerError, Result};
use chrono::{DateTime, Utc};
use ethers::types::{Address, U256};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProjectStatus {
    Active,
    Completed,
    Cancelled,
}

impl TryFrom<u8> for ProjectStatus {
    type Error = LedgerError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(ProjectStatus::Active),
            1 => Ok(ProjectStatus::Completed),
            2 => Ok(ProjectStatus::Cancelled),
            other => Err(LedgerError::Decode(format!("unknown project status {}", other))),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// Raw `projects(uint256)` tuple.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectEntry {
    pub name: String,
    pub repository: String,
    pub creator: Address,
    pub total_funding: U256,
    pub created_at: U256,
    pub status: u8,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub repository: String,
    pub creator: Address,
    pub total_funding: TokenAmount,
    pub created_at: DateTime<Utc>,
    pub status: ProjectStatus,
    pub contributors: Vec<Address>,
}

impl Project {
    pub fn from_parts(id: u64, entry: ProjectEntry, contributors: Vec<Address>) -> Result<Self> {
        Ok(Self {
            id,
            name: entry.name,
            repository: entry.repository,
            creator: entry.creator,
            total_funding: TokenAmount::from_raw(entry.total_funding),
            created_at: to_timestamp(entry.created_at, "createdAt")?,
            status: ProjectStatus::try_from(entry.status)?,
            contributors,
        })
    }
}

/// Where the id of a freshly created project came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IdSource {
    /// Decoded from the `ProjectCreated` log of the creation receipt.
    Event,
    /// `projectCount() - 1` read after confirmation. Races with other creators.
    CountInference,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectCreation {
    pub confirmation: super::TxConfirmation,
    pub project_id: u64,
    pub id_source: IdSource,
}

pub(crate) fn project_id(value: U256) -> Result<u64> {
    to_u64(value, "projectId")
}
