use blackjack_table::{
    score, Action, Outcome, Phase, Round, RoundError, Score, ScriptedDeck, TableConfig, TableView,
};
use serde_json::json;

fn scripted(ranks: &[u8]) -> Round<ScriptedDeck> {
    Round::new(ScriptedDeck::new(ranks.to_vec()))
}

#[test]
fn natural_on_the_deal_resolves_without_player_action() {
    let mut round = scripted(&[11, 10, 10, 9]);
    round.start_round().unwrap();
    let snapshot = round.run_automatic().unwrap();

    assert_eq!(round.player_hand().ranks(), &[11, 10]);
    assert_eq!(round.dealer_hand().ranks(), &[10, 9]);
    assert_eq!(round.player_score(), Score::Blackjack);
    assert_eq!(round.dealer_score(), Score::Points(19));
    assert_eq!(snapshot.phase, Phase::Resolved);
    assert_eq!(snapshot.outcome, Some(Outcome::PlayerBlackjackWin));
    assert!(snapshot.dealer_cards.iter().all(|card| !card.concealed));
}

#[test]
fn player_busts_regardless_of_dealer() {
    for dealer in [[2, 3], [10, 9], [6, 5]] {
        let mut round = scripted(&[10, dealer[0], 7, dealer[1], 6]);
        round.start_round().unwrap();
        round.run_automatic().unwrap();
        assert_eq!(round.phase(), Phase::PlayerTurn);

        round.hit().unwrap();
        assert_eq!(round.player_hand().ranks(), &[10, 7, 6]);
        assert_eq!(round.player_score(), Score::Points(23));
        assert_eq!(round.phase(), Phase::Resolved);
        assert_eq!(round.outcome(), Some(Outcome::PlayerBust));
    }
}

#[test]
fn dealer_draws_exactly_once_from_eleven_to_twenty() {
    let mut round = scripted(&[10, 6, 9, 5, 9]);
    round.start_round().unwrap();
    round.run_automatic().unwrap();
    round.stand().unwrap();

    let mut draws = 0;
    while round.phase() == Phase::DealerTurn {
        let before = round.dealer_hand().len();
        round.advance().unwrap();
        if round.dealer_hand().len() > before {
            draws += 1;
        }
    }

    assert_eq!(draws, 1);
    assert_eq!(round.dealer_score(), Score::Points(20));
    assert_eq!(round.outcome(), Some(Outcome::DealerHigher));
}

#[test]
fn dealer_keeps_drawing_through_small_cards() {
    let mut round = scripted(&[10, 2, 8, 3, 2, 2, 2, 10]);
    round.start_round().unwrap();
    round.run_automatic().unwrap();
    round.stand().unwrap();
    round.run_automatic().unwrap();

    assert_eq!(round.dealer_hand().ranks(), &[2, 3, 2, 2, 2, 10]);
    assert_eq!(round.dealer_score(), Score::Points(21));
    assert_eq!(round.outcome(), Some(Outcome::DealerHigher));
}

#[test]
fn dealer_bust_pays_the_player() {
    let mut round = scripted(&[10, 10, 2, 6, 10]);
    round.start_round().unwrap();
    round.run_automatic().unwrap();
    round.stand().unwrap();
    round.run_automatic().unwrap();

    assert_eq!(round.dealer_score(), Score::Points(26));
    assert_eq!(round.outcome(), Some(Outcome::DealerBust));
}

#[test]
fn hit_after_resolution_fails_and_leaves_hands_alone() {
    let mut round = scripted(&[11, 10, 10, 9]);
    round.start_round().unwrap();
    round.run_automatic().unwrap();
    let player = round.player_hand().clone();
    let dealer = round.dealer_hand().clone();

    let err = round.hit().unwrap_err();

    assert_eq!(
        err,
        RoundError::InvalidTransition {
            action: Action::Hit,
            phase: Phase::Resolved,
        }
    );
    assert_eq!(err.to_string(), "cannot hit during resolved");
    assert_eq!(round.player_hand(), &player);
    assert_eq!(round.dealer_hand(), &dealer);
}

#[test]
fn new_round_clears_previous_hands() {
    let mut round = scripted(&[11, 10, 10, 9, 4, 5, 6, 7]);
    round.start_round().unwrap();
    round.run_automatic().unwrap();

    round.start_round().unwrap();
    assert!(round.player_hand().is_empty());
    assert!(round.dealer_hand().is_empty());
    assert_eq!(round.outcome(), None);

    round.run_automatic().unwrap();
    assert_eq!(round.player_hand().ranks(), &[4, 6]);
    assert_eq!(round.dealer_hand().ranks(), &[5, 7]);
}

#[test]
fn independent_rounds_do_not_share_state() {
    let mut first = scripted(&[5, 9, 4, 8]);
    let mut second = scripted(&[11, 10, 10, 9]);
    first.start_round().unwrap();
    second.start_round().unwrap();
    first.run_automatic().unwrap();
    second.run_automatic().unwrap();

    assert_eq!(first.phase(), Phase::PlayerTurn);
    assert_eq!(second.phase(), Phase::Resolved);
}

#[test]
fn two_card_21s_never_score_literal_21() {
    assert_eq!(score(&[11, 10]), Score::Blackjack);
    assert_eq!(score(&[10, 11]), Score::Blackjack);
    assert_ne!(score(&[10, 11]), Score::Points(21));
}

#[test]
fn snapshot_wire_shape() {
    let mut round = scripted(&[5, 9, 4, 8]);
    round.start_round().unwrap();
    let snapshot = round.run_automatic().unwrap();
    let view = TableView::new(snapshot, &TableConfig::default());
    let value = serde_json::to_value(&view).unwrap();

    assert_eq!(
        value,
        json!({
            "snapshot": {
                "phase": "playerTurn",
                "generation": 1,
                "playerCards": [
                    { "rank": 5, "concealed": false },
                    { "rank": 4, "concealed": false }
                ],
                "dealerCards": [
                    { "rank": 9, "concealed": false },
                    { "rank": 8, "concealed": true }
                ],
                "playerScore": 9,
                "dealerScore": 9,
                "dealerMustHit": false
            },
            "status": "Your turn! Hit or Stand?",
            "controls": { "newGame": false, "hit": true, "stand": true, "playAgain": false }
        })
    );
}

#[test]
fn resolved_snapshot_carries_outcome_and_message() {
    let mut round = scripted(&[10, 11, 8, 10]);
    round.start_round().unwrap();
    let snapshot = round.run_automatic().unwrap();
    let value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(value["outcome"], "dealerBlackjackLoss");
    assert_eq!(value["message"], "Lose, opponent has Blackjack 😱");
    assert_eq!(value["dealerScore"], 21);
}
