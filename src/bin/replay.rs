use std::process::ExitCode;

use janggi::moves::Transcript;

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: replay <transcript.json>");
        return ExitCode::FAILURE;
    };

    let transcript = match std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| Transcript::from_json(&json).map_err(|e| e.to_string()))
    {
        Ok(transcript) => transcript,
        Err(err) => {
            eprintln!("{path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let (game, verdicts) = match transcript.replay() {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    for (ply, (mv, accepted)) in transcript.moves.iter().zip(&verdicts).enumerate() {
        let verdict = if *accepted { "ok" } else { "refused" };
        println!("{:>3}. {:<9} {verdict}", ply + 1, mv.to_string());
    }

    match serde_json::to_string(&game.status()) {
        Ok(status) => println!("{status}"),
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
