//! Roundtrip serialisation tests for `rollcall-core` types.
//!
//! Each `#[case]` is isolated — no shared state.

use std::collections::BTreeSet;

use rollcall_core::catalog::{CatalogConfig, TeamConfig};
use rollcall_core::types::{Member, RoleId, TeamId, UserId};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn minimal_config() -> CatalogConfig {
    CatalogConfig {
        teams: vec![],
        active_role: "Active".to_string(),
        alumni_role: "Alumni".to_string(),
    }
}

fn full_config() -> CatalogConfig {
    CatalogConfig {
        teams: vec![
            TeamConfig {
                team: TeamId::from("8097"),
                role: "Team 8097".to_string(),
                alumni_role: "Team 8097 Alumni".to_string(),
            },
            TeamConfig {
                team: TeamId::from("254"),
                role: "Team 254".to_string(),
                alumni_role: "Team 254 Alumni".to_string(),
            },
        ],
        active_role: "Active".to_string(),
        alumni_role: "Alumni".to_string(),
    }
}

fn bare_member() -> Member {
    Member {
        id: UserId(1),
        username: "ada#1".to_string(),
        display_name: "ada#1".to_string(),
        role_ids: BTreeSet::new(),
        is_administrator: false,
    }
}

fn decorated_member() -> Member {
    Member {
        id: UserId(77),
        username: "grace#2".to_string(),
        display_name: "Grace H.".to_string(),
        role_ids: [RoleId(1), RoleId(5)].into_iter().collect(),
        is_administrator: true,
    }
}

// ---------------------------------------------------------------------------
// Cases
// ---------------------------------------------------------------------------

#[rstest]
#[case::minimal(minimal_config())]
#[case::full(full_config())]
fn config_yaml_roundtrip(#[case] config: CatalogConfig) {
    let yaml = serde_yaml::to_string(&config).expect("serialize");
    let back: CatalogConfig = serde_yaml::from_str(&yaml).expect("deserialize");
    assert_eq!(back, config);
}

#[rstest]
#[case::bare(bare_member())]
#[case::decorated(decorated_member())]
fn member_yaml_roundtrip(#[case] member: Member) {
    let yaml = serde_yaml::to_string(&member).expect("serialize");
    let back: Member = serde_yaml::from_str(&yaml).expect("deserialize");
    assert_eq!(back, member);
}

#[test]
fn member_defaults_apply_on_sparse_documents() {
    let back: Member = serde_yaml::from_str(
        "id: 9\nusername: kay#3\ndisplay_name: kay#3\n",
    )
    .expect("deserialize");
    assert!(back.role_ids.is_empty());
    assert!(!back.is_administrator);
}
