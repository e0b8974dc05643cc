//! User file validation and ingestion

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use reelcheck_domain::{Gender, UserId, UserRecord};
use tracing::info;

use crate::pipeline::run_rows;
use crate::rules::{check_width, parse_integer, Rejection};
use crate::{
    CapRegistry, FatalReason, IngestConfig, IngestError, IngestReport, RawRow, Repair, RepairKind,
    RowSource, SkipReason,
};

/// Columns a user file must declare
pub const USER_COLUMNS: [&str; 5] = ["UserID", "Gender", "Age", "CAP", "Work"];

/// Known misspelled occupations
pub const JOB_REPAIRS: &[(&str, &str)] = &[("Data Scientis", "Data Scientist")];

/// Ingests a user file, checking postal codes against a [`CapRegistry`]
#[derive(Debug, Clone)]
pub struct UserIngestor {
    config: IngestConfig,
    caps: CapRegistry,
}

impl UserIngestor {
    /// Create an ingestor
    pub fn new(config: IngestConfig, caps: CapRegistry) -> Self {
        Self { config, caps }
    }

    /// Run one pass over already-read rows
    pub fn ingest<I>(&self, rows: I) -> Result<IngestReport<Vec<UserRecord>>, IngestError>
    where
        I: IntoIterator<Item = Result<RawRow, IngestError>>,
    {
        let mut seen_ids = HashSet::new();

        let report = run_rows("users", rows, |row, log| {
            let outcome = Rejection::outcome(self.check(row, &mut seen_ids));
            outcome.map(|(user, repair)| {
                if let Some(repair) = repair {
                    log.repair(row, &repair);
                }
                user
            })
        })?;

        info!(rows = report.rows_read, accepted = report.records.len(), "Users ingested");
        Ok(report)
    }

    /// Read a delimited user file from any reader
    pub fn ingest_reader<R: Read>(&self, reader: R) -> Result<IngestReport<Vec<UserRecord>>, IngestError> {
        let source = RowSource::new(reader, self.config.delimiter_byte()?)?;
        source.require_columns(&USER_COLUMNS)?;
        self.ingest(source)
    }

    /// Read a delimited user file from disk
    pub fn ingest_path<P: AsRef<Path>>(&self, path: P) -> Result<IngestReport<Vec<UserRecord>>, IngestError> {
        let source = RowSource::from_path(path, self.config.delimiter_byte()?)?;
        source.require_columns(&USER_COLUMNS)?;
        self.ingest(source)
    }

    fn check(
        &self,
        row: &RawRow,
        seen_ids: &mut HashSet<UserId>,
    ) -> Result<(UserRecord, Option<Repair>), Rejection> {
        check_width(row, self.config.user_columns, self.config.enforce_column_width)?;

        let user_id = parse_integer("UserID", row.value("UserID"))?;
        if !seen_ids.insert(user_id) {
            return Err(FatalReason::DuplicateId {
                entity: "user",
                id: user_id,
            }
            .into());
        }

        let raw_gender = row.value("Gender").trim();
        let gender = Gender::parse(raw_gender)
            .ok_or_else(|| SkipReason::InvalidGender(raw_gender.to_string()))?;

        let age = parse_integer("Age", row.value("Age"))?;
        let (min, max) = (self.config.min_user_age, self.config.max_user_age);
        let age = u8::try_from(age)
            .ok()
            .filter(|a| (min..=max).contains(a))
            .ok_or(SkipReason::AgeOutOfRange { age, min, max })?;

        let cap = row.value("CAP").trim();
        if !self.caps.contains(cap) {
            return Err(SkipReason::UnknownCap(cap.to_string()).into());
        }
        if cap.is_empty() || !cap.chars().all(|c| c.is_ascii_digit()) {
            return Err(SkipReason::NonNumericCap(cap.to_string()).into());
        }

        let raw_job = row.value("Work").trim();
        let (job, repair) = match repair_job(raw_job) {
            Some(fixed) => (fixed.to_string(), Some(Repair::new(RepairKind::Job, raw_job, fixed))),
            None => (raw_job.to_string(), None),
        };

        Ok((
            UserRecord {
                user_id,
                gender,
                age,
                cap: cap.to_string(),
                job,
            },
            repair,
        ))
    }
}

fn repair_job(job: &str) -> Option<&'static str> {
    JOB_REPAIRS
        .iter()
        .find(|(bad, _)| *bad == job)
        .map(|(_, good)| *good)
}

/// Ingest a user file
pub fn ingest_users<R: Read>(
    reader: R,
    caps: &CapRegistry,
    config: &IngestConfig,
) -> Result<IngestReport<Vec<UserRecord>>, IngestError> {
    UserIngestor::new(config.clone(), caps.clone()).ingest_reader(reader)
}
