use janggi::game::Game;
use janggi::moves::Move;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MAX_PLIES: usize = 300;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let games: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(0);

    for game_index in 0..games {
        let mut rng = StdRng::seed_from_u64(seed + game_index);
        let mut game = Game::new();
        let mut ply = 0;

        while !game.game_state().is_finished() && ply < MAX_PLIES {
            let moves = game.legal_moves();
            let (source, destination) = if moves.is_empty() {
                // Nothing but a pass is left.
                match game.board().general(game.player_turn()) {
                    Some(general) => (general.position(), general.position()),
                    None => break,
                }
            } else {
                moves[rng.gen_range(0..moves.len())]
            };

            if !game.commit_move(source, destination) {
                eprintln!("Refused generated move {}", Move::from_points(source, destination));
                break;
            }
            ply += 1;
        }

        let status = game.status();
        eprintln!(
            "Game {game_index} over after {ply} plies: {:?} ({} pieces left)",
            status.game_state,
            game.board().len()
        );
    }
}
