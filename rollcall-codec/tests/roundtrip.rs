//! Round-trip property of the snapshot codec: for any roster with unique
//! usernames, `decode(encode(r))` reproduces the display names and the
//! managed-role flag matrix exactly.

use std::collections::BTreeSet;

use rollcall_codec::{decode, encode, snapshot_rows};
use rollcall_core::catalog::{CatalogConfig, RoleCatalog, TeamConfig};
use rollcall_core::provider::PlatformRole;
use rollcall_core::types::{Member, RoleId, Roster, TeamId, UserId};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn catalog() -> RoleCatalog {
    let config = CatalogConfig {
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
    };
    let platform = vec![
        PlatformRole { id: RoleId(1), name: "Team 8097".to_string() },
        PlatformRole { id: RoleId(2), name: "Team 8097 Alumni".to_string() },
        PlatformRole { id: RoleId(3), name: "Team 254".to_string() },
        PlatformRole { id: RoleId(4), name: "Team 254 Alumni".to_string() },
        PlatformRole { id: RoleId(5), name: "Active".to_string() },
        PlatformRole { id: RoleId(6), name: "Alumni".to_string() },
    ];
    RoleCatalog::resolve(&config, &platform).expect("catalog")
}

fn member(id: u64, username: &str, display: &str, roles: &[u64]) -> Member {
    Member {
        id: UserId(id),
        username: username.to_string(),
        display_name: display.to_string(),
        role_ids: roles.iter().copied().map(RoleId).collect(),
        is_administrator: false,
    }
}

fn empty_roster() -> Roster {
    Roster::new(vec![]).expect("roster")
}

fn single_member() -> Roster {
    Roster::new(vec![member(1, "ada#1", "Ada L.", &[1, 5])]).expect("roster")
}

fn mixed_roster() -> Roster {
    Roster::new(vec![
        member(1, "ada#1", "Ada L.", &[1, 5]),
        member(2, "grace#2", "Grace H.", &[2, 4, 6]),
        member(3, "kay#3", "kay#3", &[]),
        member(4, "edsger#4", "Edsger D.", &[3, 5]),
    ])
    .expect("roster")
}

fn awkward_names() -> Roster {
    Roster::new(vec![
        member(1, "quote\"inside#1", "Said \"hi\"", &[1]),
        member(2, "commas, everywhere#2", "Last, First", &[5, 6]),
        member(3, "unicode#3", "Ada Löv", &[]),
    ])
    .expect("roster")
}

// ---------------------------------------------------------------------------
// Cases
// ---------------------------------------------------------------------------

#[rstest]
#[case::empty(empty_roster())]
#[case::single(single_member())]
#[case::mixed(mixed_roster())]
#[case::awkward(awkward_names())]
fn decode_reverses_encode(#[case] roster: Roster) {
    let catalog = catalog();
    let bytes = encode(&roster, &catalog).expect("encode");
    let rows = decode(&bytes, &catalog).expect("decode");
    assert_eq!(rows, snapshot_rows(&roster, &catalog));
}

#[test]
fn flag_matrix_tracks_catalog_order() {
    let catalog = catalog();
    let roster = mixed_roster();
    let rows = decode(&encode(&roster, &catalog).expect("encode"), &catalog).expect("decode");

    // grace#2 holds "Team 8097 Alumni", "Team 254 Alumni", and "Alumni".
    let grace = rows.iter().find(|r| r.username == "grace#2").expect("row");
    assert_eq!(grace.flags, vec![false, true, false, true, false, true]);
}

#[test]
fn unmanaged_roles_survive_roundtrip_only_as_absence() {
    let catalog = catalog();
    let mut m = member(1, "ada#1", "Ada L.", &[1, 5]);
    m.role_ids.insert(RoleId(999));
    let roster = Roster::new(vec![m]).expect("roster");

    let rows = decode(&encode(&roster, &catalog).expect("encode"), &catalog).expect("decode");
    let restored: BTreeSet<bool> = rows[0].flags.iter().copied().collect();
    assert_eq!(rows[0].flags.len(), 6);
    assert!(restored.contains(&true));
}
