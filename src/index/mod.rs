//! PEP 0 and the other generated indices.
//!
//! - [`classify`]: the index category a PEP is listed under
//! - [`PepZeroWriter`]: the fixed-width reStructuredText index
//! - [`write_topic`]: per-topic sub-indices
//! - [`create_pep_json`]: the `peps.json` API file
//! - [`generate`]: parse all sources and write every output

mod json;
mod subindex;
mod writer;

pub use json::{PepDetails, create_pep_json};
pub use subindex::{TOPIC_INDEX, write_topic};
pub use writer::{
    AUTHOR_LENGTH, INTRO, PepZeroWriter, REFERENCES, RESERVED, TITLE_LENGTH, pep_zero_header,
    verify_email_addresses,
};

use crate::error::Result;
use crate::model::{AuthorOverrides, Pep, PepStatus, PepType, Topic};
use crate::storage::{PepRepository, parse_pep};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub const PEP_ZERO_FILENAME: &str = "pep-0000.rst";

/// Index categories, in the order they appear in PEP 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    Meta,
    Informational,
    Provisional,
    Accepted,
    Open,
    Finished,
    Historical,
    Deferred,
    Dead,
}

impl Bucket {
    pub const ALL: [Bucket; 9] = [
        Bucket::Meta,
        Bucket::Informational,
        Bucket::Provisional,
        Bucket::Accepted,
        Bucket::Open,
        Bucket::Finished,
        Bucket::Historical,
        Bucket::Deferred,
        Bucket::Dead,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Bucket::Meta => "Meta-PEPs (PEPs about PEPs or Processes)",
            Bucket::Informational => "Other Informational PEPs",
            Bucket::Provisional => {
                "Provisional PEPs (provisionally accepted; interface may still change)"
            }
            Bucket::Accepted => "Accepted PEPs (accepted; may not be implemented yet)",
            Bucket::Open => "Open PEPs (under consideration)",
            Bucket::Finished => "Finished PEPs (done, with a stable interface)",
            Bucket::Historical => "Historical Meta-PEPs and Informational PEPs",
            Bucket::Deferred => "Deferred PEPs (postponed pending further research or updates)",
            Bucket::Dead => "Abandoned, Withdrawn, and Rejected PEPs",
        }
    }

    pub fn anchor(&self) -> &'static str {
        match self {
            Bucket::Meta => "by-category-meta",
            Bucket::Informational => "by-category-other-info",
            Bucket::Provisional => "by-category-provisional",
            Bucket::Accepted => "by-category-accepted",
            Bucket::Open => "by-category-open",
            Bucket::Finished => "by-category-finished",
            Bucket::Historical => "by-category-historical",
            Bucket::Deferred => "by-category-deferred",
            Bucket::Dead => "by-category-abandoned",
        }
    }
}

/// The category `pep` is listed under. Status takes precedence over type
/// for drafts and deferrals; the first matching rule wins.
pub fn classify(pep: &Pep) -> Bucket {
    use PepStatus::*;

    match (pep.pep_type, pep.status) {
        (_, Draft) => Bucket::Open,
        (_, Deferred) => Bucket::Deferred,
        (PepType::Process, Active) => Bucket::Meta,
        (PepType::Process, Withdrawn | Rejected) => Bucket::Dead,
        (PepType::Process, _) => Bucket::Historical,
        (_, status) if status.is_dead() => Bucket::Dead,
        (PepType::Informational, Active) => Bucket::Informational,
        // Release schedules that are no longer active are history.
        (PepType::Informational, _) if !pep.title.contains("Release Schedule") => {
            Bucket::Informational
        }
        (PepType::Informational, _) => Bucket::Historical,
        (_, Provisional) => Bucket::Provisional,
        (_, Accepted | Active) => Bucket::Accepted,
        (_, Final) => Bucket::Finished,
        // Dead statuses were matched above.
        (_, Rejected | Withdrawn | Superseded) => Bucket::Dead,
    }
}

/// Parse every PEP under the repository's source directory and write
/// PEP 0, the topic pages and `peps.json`. Returns the written paths.
pub fn generate(
    repo: &PepRepository,
    overrides: &AuthorOverrides,
    today: NaiveDate,
) -> Result<Vec<PathBuf>> {
    let mut peps = repo.load_all(overrides)?;
    tracing::info!(count = peps.len(), source = %repo.source_path().display(), "Loaded PEPs");

    let mut written = Vec::new();

    let pep0_text = PepZeroWriter::new().write_pep0(&peps, today)?;
    let pep0_path = repo.write_output(Path::new(PEP_ZERO_FILENAME), &pep0_text)?;
    written.push(pep0_path.clone());

    written.push(repo.write_output(Path::new("topic/index.rst"), TOPIC_INDEX)?);
    for topic in Topic::ALL {
        let text = write_topic(topic, &peps)?;
        let relative = PathBuf::from("topic").join(format!("{}.rst", topic.slug()));
        written.push(repo.write_output(&relative, &text)?);
    }

    peps.insert(0, parse_pep(&pep0_path, &pep0_text, overrides)?);
    let json = create_pep_json(&peps)?;
    written.push(repo.write_output(Path::new("peps.json"), &json)?);
    written.push(repo.write_output(Path::new("api/peps.json"), &json)?);

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Author;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    fn pep(title: &str, pep_type: PepType, status: PepStatus) -> Pep {
        Pep {
            number: 1,
            title: title.to_string(),
            authors: vec![Author::parse("Aahz", "", &AuthorOverrides::default()).unwrap()],
            status,
            pep_type,
            created: "01-Jan-2001".to_string(),
            topic: BTreeSet::new(),
            sponsor: None,
            delegate: None,
            discussions_to: None,
            python_version: None,
            post_history: None,
            resolution: None,
            requires: None,
            replaces: None,
            superseded_by: None,
            filename: PathBuf::from("pep-0001.rst"),
        }
    }

    fn bucket(pep_type: PepType, status: PepStatus) -> Bucket {
        classify(&pep("Title", pep_type, status))
    }

    #[test]
    fn test_classify_status_first() {
        for pep_type in PepType::ALL {
            assert_eq!(bucket(pep_type, PepStatus::Draft), Bucket::Open);
            assert_eq!(bucket(pep_type, PepStatus::Deferred), Bucket::Deferred);
        }
    }

    #[test]
    fn test_classify_process() {
        assert_eq!(bucket(PepType::Process, PepStatus::Active), Bucket::Meta);
        assert_eq!(bucket(PepType::Process, PepStatus::Withdrawn), Bucket::Dead);
        assert_eq!(bucket(PepType::Process, PepStatus::Rejected), Bucket::Dead);
        assert_eq!(bucket(PepType::Process, PepStatus::Final), Bucket::Historical);
        assert_eq!(bucket(PepType::Process, PepStatus::Superseded), Bucket::Historical);
        assert_eq!(bucket(PepType::Process, PepStatus::Accepted), Bucket::Historical);
    }

    #[test]
    fn test_classify_informational() {
        assert_eq!(
            bucket(PepType::Informational, PepStatus::Active),
            Bucket::Informational
        );
        assert_eq!(
            bucket(PepType::Informational, PepStatus::Final),
            Bucket::Informational
        );
        assert_eq!(
            bucket(PepType::Informational, PepStatus::Superseded),
            Bucket::Dead
        );
        let schedule = pep(
            "Python 2.7 Release Schedule",
            PepType::Informational,
            PepStatus::Final,
        );
        assert_eq!(classify(&schedule), Bucket::Historical);
        let active_schedule = pep(
            "Python 3.13 Release Schedule",
            PepType::Informational,
            PepStatus::Active,
        );
        assert_eq!(classify(&active_schedule), Bucket::Informational);
    }

    #[test]
    fn test_classify_standards_track() {
        let st = PepType::StandardsTrack;
        assert_eq!(bucket(st, PepStatus::Provisional), Bucket::Provisional);
        assert_eq!(bucket(st, PepStatus::Accepted), Bucket::Accepted);
        assert_eq!(bucket(st, PepStatus::Active), Bucket::Accepted);
        assert_eq!(bucket(st, PepStatus::Final), Bucket::Finished);
        assert_eq!(bucket(st, PepStatus::Rejected), Bucket::Dead);
        assert_eq!(bucket(st, PepStatus::Withdrawn), Bucket::Dead);
        assert_eq!(bucket(st, PepStatus::Superseded), Bucket::Dead);
    }

    #[test]
    fn test_generate_writes_all_outputs() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("peps");
        fs::create_dir_all(&source).unwrap();
        fs::write(
            source.join("pep-0484.rst"),
            "PEP: 484\nTitle: Type Hints\nAuthor: Guido van Rossum <guido@python.org>\nStatus: Final\nType: Standards Track\nTopic: Typing\nCreated: 29-Sep-2014\n\nBody.\n",
        )
        .unwrap();
        let repo = PepRepository::with_paths(source, tmp.path().join("build"));
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let written = generate(&repo, &AuthorOverrides::default(), today).unwrap();
        assert_eq!(written.len(), 2 + Topic::ALL.len() + 2);

        let build = tmp.path().join("build");
        let pep0 = fs::read_to_string(build.join("pep-0000.rst")).unwrap();
        assert!(pep0.contains("SF  484  Type Hints"));
        assert_eq!(
            fs::read_to_string(build.join("topic/index.rst")).unwrap(),
            TOPIC_INDEX
        );
        let typing = fs::read_to_string(build.join("topic/typing.rst")).unwrap();
        assert!(typing.contains("SF  484  Type Hints"));
        let packaging = fs::read_to_string(build.join("topic/packaging.rst")).unwrap();
        assert!(!packaging.contains("Type Hints"));

        let json = fs::read_to_string(build.join("peps.json")).unwrap();
        assert_eq!(json, fs::read_to_string(build.join("api/peps.json")).unwrap());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["0"]["title"],
            "Index of Python Enhancement Proposals (PEPs)"
        );
        assert_eq!(value["0"]["authors"], "python-dev");
        assert_eq!(value["484"]["topic"], "typing");
    }

    #[test]
    fn test_generate_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("peps");
        fs::create_dir_all(&source).unwrap();
        fs::write(
            source.join("pep-0008.rst"),
            "PEP: 8\nTitle: Style Guide for Python Code\nAuthor: Guido van Rossum <guido@python.org>, Barry Warsaw <barry@python.org>\nStatus: Active\nType: Process\nCreated: 05-Jul-2001\n\n",
        )
        .unwrap();
        fs::write(
            source.join("pep-0484.rst"),
            "PEP: 484\nTitle: Type Hints\nAuthor: Guido van Rossum <guido@python.org>, Jukka Lehtosalo <jukka.lehtosalo@iki.fi>, Łukasz Langa <lukasz@python.org>\nStatus: Final\nType: Standards Track\nTopic: Typing\nCreated: 29-Sep-2014\n\n",
        )
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let first = tmp.path().join("first");
        let second = tmp.path().join("second");
        for output in [&first, &second] {
            let repo = PepRepository::with_paths(source.clone(), output.clone());
            generate(&repo, &AuthorOverrides::default(), today).unwrap();
        }

        for name in ["pep-0000.rst", "peps.json", "topic/typing.rst"] {
            assert_eq!(
                fs::read(first.join(name)).unwrap(),
                fs::read(second.join(name)).unwrap(),
                "{name}"
            );
        }
    }
}
