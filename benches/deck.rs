use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rust_concentration::cards::{CardId, Deck};
use rust_concentration::core::{GameConfig, GameRng, ManualClock};
use rust_concentration::session::SessionController;

fn bench_build_classic(c: &mut Criterion) {
    let config = GameConfig::default();
    let mut rng = GameRng::new(42);

    c.bench_function("deck_build_classic", |b| {
        b.iter(|| Deck::build(black_box(&config.symbols), &mut rng))
    });
}

fn bench_perfect_game(c: &mut Criterion) {
    c.bench_function("perfect_game_classic", |b| {
        b.iter(|| {
            let config = GameConfig::default().with_seed(7);
            let mut game = SessionController::with_clock(config, ManualClock::new()).ok()?;
            let deck = game.deck();
            for card in deck.iter() {
                let partner = deck
                    .iter()
                    .find(|other| other.id > card.id && other.symbol == card.symbol);
                if let Some(partner) = partner {
                    game.select_card(card.id).ok()?;
                    game.select_card(partner.id).ok()?;
                }
            }
            Some(game.moves_taken())
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let config = GameConfig::default().with_seed(7);
    let Ok(mut game) = SessionController::with_clock(config, ManualClock::new()) else {
        return;
    };
    let _ = game.select_card(CardId::new(0));

    c.bench_function("snapshot", |b| b.iter(|| black_box(game.snapshot())));
}

criterion_group!(benches, bench_build_classic, bench_perfect_game, bench_snapshot);
criterion_main!(benches);
