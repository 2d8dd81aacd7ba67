//! End-to-end parsing of rendered battle reports.

use std::path::Path;

use battlelog::battle::{Hit, Position, ResumeTeam, Strike, Team, User};
use battlelog::{parse_html, ErrorKind, ParseOptions};

fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture() -> String {
    std::fs::read_to_string(fixture_path("battle_report.html")).expect("read fixture")
}

fn options() -> ParseOptions {
    ParseOptions::new(2024)
}

/// Wraps card bodies into a report with the trailing footer card.
fn report(cards: &[&str]) -> String {
    let mut html = String::from("<html><body>");
    for card in cards {
        html.push_str(r#"<div class="card">"#);
        html.push_str(card);
        html.push_str("</div>");
    }
    html.push_str(r#"<div class="card">footer</div></body></html>"#);
    html
}

const CENSUS: &str = "📯Battle for Moria [RG2]<br>-<br>🇮🇲Red Castle: 5 total 5 alive";
const TIMESTAMP: &str = "Battle 03-04 10:00";

#[test]
fn parse_fixture_metadata() {
    let battle = parse_html(&fixture(), &options()).expect("parse");

    assert_eq!(battle.date.to_rfc3339(), "2024-06-15T16:00:00+00:00");
    assert_eq!(
        battle.resume.position,
        Position {
            team: Team::Green,
            x: 0,
            y: 5
        }
    );
    assert_eq!(
        battle.resume.teams,
        vec![
            ResumeTeam {
                team: Team::Green,
                total: 10,
                alive: 7
            },
            ResumeTeam {
                team: Team::Yellow,
                total: 8,
                alive: 8
            },
        ]
    );
}

#[test]
fn parse_fixture_turns_in_order() {
    let battle = parse_html(&fixture(), &options()).expect("parse");
    assert_eq!(battle.turns.len(), 4, "footer card is not a turn");

    let attackers: Vec<&str> = battle.turns.iter().map(|turn| turn.attacker.name.as_str()).collect();
    assert_eq!(attackers, vec!["Alice", "Bob", "Carol", "Bob"]);

    let first = &battle.turns[0];
    assert_eq!(first.attacker, User::new(Team::Yellow, "Alice"));
    assert_eq!(first.target, Some(User::new(Team::Green, "Bob")));
    assert_eq!(
        first.strikes,
        vec![
            Strike::Hit(Hit {
                damage: 42,
                target_defense: 7,
                crit: false,
                weakness: false,
                counter: false
            }),
            Strike::Miss,
            Strike::Hit(Hit {
                damage: 60,
                target_defense: 5,
                crit: true,
                weakness: true,
                counter: false
            }),
        ]
    );
}

#[test]
fn parse_fixture_counter_attacks() {
    let battle = parse_html(&fixture(), &options()).expect("parse");

    let second = &battle.turns[1];
    assert_eq!(second.strikes.len(), 2, "arrow recovery line is dropped");
    assert_eq!(
        second.strikes[1],
        Strike::Hit(Hit {
            damage: 8,
            target_defense: 3,
            crit: false,
            weakness: false,
            counter: true
        })
    );

    let last = &battle.turns[3];
    assert_eq!(last.strikes, vec![Strike::Miss, Strike::UnresolvedCounter]);
}

#[test]
fn announcement_turn_has_no_target() {
    let battle = parse_html(&fixture(), &options()).expect("parse");
    let carol = &battle.turns[2];
    assert_eq!(carol.attacker, User::new(Team::Yellow, "Carol"));
    assert!(carol.target.is_none());
    assert!(carol.strikes.is_empty());
}

#[test]
fn turn_tallies_hold_for_every_turn() {
    let battle = parse_html(&fixture(), &options()).expect("parse");
    for turn in &battle.turns {
        assert_eq!(turn.hits() + turn.misses(), turn.strikes.len());
        let landed: i64 = turn.strikes.iter().filter_map(Strike::hit).map(|hit| hit.damage).sum();
        assert_eq!(turn.damage(), Ok(landed));
    }
}

#[test]
fn report_without_turns_parses() {
    let battle = parse_html(&report(&[CENSUS, TIMESTAMP]), &options()).expect("parse");
    assert!(battle.turns.is_empty());
    assert_eq!(battle.resume.teams.len(), 1);
}

#[test]
fn too_few_cards_is_shape_violation() {
    let html = r#"<body><div class="card">📯Battle for a [GR1]</div><div class="card">x</div></body>"#;
    let err = parse_html(html, &options()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Shape);
}

#[test]
fn unknown_banner_fails_whole_document() {
    let err = parse_html(&report(&["📯Skirmish [GR1]", TIMESTAMP, "🇻🇦A turn"]), &options()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Shape);
    assert_eq!(err.location.card, Some(0));
}

#[test]
fn timestamp_error_is_located_in_second_card() {
    let err = parse_html(&report(&[CENSUS, "Battle 03-04<br>10:00"]), &options()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Shape);
    assert_eq!(err.location.card, Some(1));
}

#[test]
fn one_bad_turn_invalidates_the_battle() {
    let html = report(&[
        CENSUS,
        TIMESTAMP,
        "🇮🇲Rex turn",
        "🇮🇲Rex turn<br>target: 👹Ogre 50HP, strikes: 1<br>heals himself",
    ]);
    let err = parse_html(&html, &options()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lexical);
    assert_eq!(err.location.card, Some(3));
    assert_eq!(err.location.line, Some(2));
    assert_eq!(err.location.text.as_deref(), Some("heals himself"));
    assert!(err.to_string().contains("card 3, line 2"), "{err}");
}

#[test]
fn unknown_identity_glyph_is_semantic() {
    let html = report(&[CENSUS, TIMESTAMP, "🇫🇷Pierre turn"]);
    let err = parse_html(&html, &options()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Semantic);
    assert_eq!(err.location.card, Some(2));
}

#[test]
fn monster_battle_banner_and_creatures() {
    let html = report(&[
        "📯Battle with the swamp horde [B4#7]<br>-<br>🇪🇺Blue Castle: 3 total 2 alive<br>👹Creatures: 9 total 9 alive",
        TIMESTAMP,
        "👹Troll turn<br>target: 🇪🇺Finn 40HP, strikes: 1<br>crit strike! dmg: 100. Pdef was: 20<br>🇪🇺Finn 0HP left",
    ]);
    let battle = parse_html(&html, &options()).expect("parse");
    assert_eq!(
        battle.resume.position,
        Position {
            team: Team::Blue,
            x: 7,
            y: 4
        }
    );
    assert_eq!(battle.resume.teams[1].team, Team::Monster);
    assert_eq!(battle.turns[0].attacker, User::new(Team::Monster, "Troll"));
    assert!(battle.turns[0].strikes[0].is_crit());
}

#[test]
fn battle_serializes_to_json() {
    let battle = parse_html(&fixture(), &options()).expect("parse");
    let json = serde_json::to_value(&battle).expect("encode");
    assert_eq!(json["turns"][0]["attacker"]["team"], "Yellow");
    assert_eq!(json["turns"][2]["target"], serde_json::Value::Null);
    assert_eq!(json["turns"][3]["strikes"][1]["outcome"], "unresolved_counter");
    assert_eq!(json["date"], "2024-06-15T16:00:00Z");
}
