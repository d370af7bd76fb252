//! Integration tests for the reporting engine

mod common;

use arena::{
    ArenaError, Registry, ReportingEngine,
    entities::{PenaltyKind, TournamentStatus},
    rating::Tier,
    registry::ParticipantRef,
};
use common::{create_tournament, register_game, register_team, registry_with_players, solo};

/// Two teams and two solo players with three finished matches:
/// Alpha beats Bravo, Alpha draws Bravo, s2 beats s1 through matchmaking.
async fn season() -> (Registry, ReportingEngine) {
    let registry = registry_with_players(&["a1", "a2", "b1", "b2", "s1", "s2"]).await;
    register_game(&registry, "Valorant", 2).await;
    register_team(&registry, "Alpha", "Valorant", &["a1", "a2"]).await;
    register_team(&registry, "Bravo", "Valorant", &["b1", "b2"]).await;
    create_tournament(&registry, "Masters", "Valorant").await;

    let alpha = ParticipantRef::team("Alpha");
    let bravo = ParticipantRef::team("Bravo");
    for participant in [alpha.clone(), bravo.clone(), solo("s1"), solo("s2")] {
        registry.enroll("Masters", &participant).await.unwrap();
    }
    registry.start_tournament("Masters").await.unwrap();

    let opener = registry
        .schedule_match("Masters", &alpha, &bravo, 1)
        .await
        .unwrap();
    registry.finalize_match(opener, 10, 3).await.unwrap();
    let rematch = registry
        .schedule_match("Masters", &alpha, &bravo, 2)
        .await
        .unwrap();
    registry.finalize_match(rematch, 2, 2).await.unwrap();

    registry.join_queue("s1").await.unwrap();
    registry.join_queue("s2").await.unwrap();
    let queued = registry.process_queue().await.unwrap();
    registry.finalize_match(queued[0], 0, 1).await.unwrap();

    let reports = ReportingEngine::new(registry.clone());
    (registry, reports)
}

#[tokio::test]
async fn test_ranking_breaks_ties_by_registration() {
    let (_, reports) = season().await;
    let ranking = reports.ranking().await;

    let rows: Vec<_> = ranking
        .iter()
        .map(|entry| (entry.position, entry.nickname.as_str(), entry.rating))
        .collect();
    assert_eq!(
        rows,
        vec![
            (1, "a1", 1030),
            (2, "a2", 1030),
            (3, "s2", 1025),
            (4, "b1", 990),
            (5, "b2", 990),
            (6, "s1", 985),
        ]
    );
    assert_eq!(ranking[3].tier, Tier::Bronze);
}

#[tokio::test]
async fn test_win_reports() {
    let (_, reports) = season().await;

    let wins: Vec<_> = reports
        .top_wins()
        .await
        .into_iter()
        .map(|row| (row.nickname, row.wins))
        .collect();
    assert_eq!(
        wins,
        vec![
            ("a1".to_string(), 1),
            ("a2".to_string(), 1),
            ("s2".to_string(), 1),
        ]
    );

    let teams = reports.team_win_rates().await;
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].team, "Alpha");
    assert_eq!((teams[0].wins, teams[0].matches), (1, 2));
    assert!((teams[0].win_rate - 0.5).abs() < f64::EPSILON);
    assert_eq!(teams[1].team, "Bravo");
    assert_eq!(teams[1].win_rate, 0.0);
}

#[tokio::test]
async fn test_player_history_and_win_rate() {
    let (registry, reports) = season().await;

    let history = reports.player_history("A1").await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].round, 2);
    assert_eq!(history[1].round, 1);

    assert!((reports.player_win_rate("a1").await.unwrap() - 0.5).abs() < f64::EPSILON);
    assert_eq!(reports.player_win_rate("s1").await.unwrap(), 0.0);
    assert_eq!(reports.player_win_rate("s2").await.unwrap(), 1.0);
    assert!(matches!(
        reports.player_win_rate("ghost").await,
        Err(ArenaError::PlayerNotFound(_))
    ));

    registry
        .register_player(common::player("rookie"))
        .await
        .unwrap();
    assert!(reports.player_history("rookie").await.unwrap().is_empty());
    assert_eq!(reports.player_win_rate("rookie").await.unwrap(), 0.0);
}

#[tokio::test]
async fn test_distribution_and_stats() {
    let (_, reports) = season().await;

    let tiers: Vec<_> = reports
        .tier_distribution()
        .await
        .into_iter()
        .map(|row| (row.tier, row.players))
        .collect();
    assert_eq!(
        tiers,
        vec![
            (Tier::Bronze, 3),
            (Tier::Silver, 3),
            (Tier::Gold, 0),
            (Tier::Diamond, 0),
            (Tier::Master, 0),
        ]
    );

    let stats = reports.general_stats().await;
    assert_eq!(stats.players, 6);
    assert_eq!(stats.teams, 2);
    assert_eq!(stats.games, 1);
    assert_eq!(stats.tournaments, 1);
    assert_eq!(stats.active_tournaments, 1);
    assert_eq!(stats.matches, 3);
    assert_eq!(stats.finished_matches, 3);
    assert_eq!(stats.queued_players, 0);
    let average = stats.average_rating.unwrap();
    assert!((average - 6050.0 / 6.0).abs() < 1e-9);

    let active = reports.active_tournaments().await;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].status, TournamentStatus::InProgress);
    assert_eq!(active[0].participants, vec!["Alpha", "Bravo", "s1", "s2"]);
}

#[tokio::test]
async fn test_most_penalized_counts_active_only() {
    let registry = registry_with_players(&["calm", "rowdy", "late"]).await;
    let reports = ReportingEngine::new(registry.clone());

    for _ in 0..2 {
        registry
            .issue_penalty("rowdy", PenaltyKind::Behavior, "Trash talk")
            .await
            .unwrap();
    }
    let served = registry
        .issue_penalty("late", PenaltyKind::Late, "Missed round one")
        .await
        .unwrap();
    registry
        .issue_penalty("late", PenaltyKind::Late, "Missed round two")
        .await
        .unwrap();
    registry.serve_penalty(served).await.unwrap();

    let rows: Vec<_> = reports
        .most_penalized()
        .await
        .into_iter()
        .map(|row| (row.nickname, row.active_penalties))
        .collect();
    assert_eq!(
        rows,
        vec![("rowdy".to_string(), 2), ("late".to_string(), 1)]
    );

    let stats = reports.general_stats().await;
    assert_eq!(stats.penalties, 4);
    assert_eq!(stats.active_penalties, 3);
}

#[tokio::test]
async fn test_empty_registry_reports() {
    let reports = ReportingEngine::new(Registry::new());
    assert!(reports.ranking().await.is_empty());
    assert!(reports.top_wins().await.is_empty());
    assert!(reports.team_win_rates().await.is_empty());
    assert_eq!(reports.tier_distribution().await.len(), Tier::ALL.len());
    assert!(reports.general_stats().await.average_rating.is_none());
}
