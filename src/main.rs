use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdin, stdout, Write};

use dropfour_ai::*;

fn main() -> Result<()> {
    let stdin = stdin();

    println!("Welcome to Drop Four\n");

    let mut config = SearchConfig::default();

    // choose the search depth
    loop {
        let mut buffer = String::new();
        print!(
            "Search depth in plies (default {}): ",
            SearchConfig::DEFAULT_PLY
        );
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;

        let input = buffer.trim();
        if input.is_empty() {
            break;
        }
        match input.parse::<usize>() {
            Ok(ply) => match config.set_ply(ply) {
                Ok(()) => break,
                Err(err) => println!("{}", err),
            },
            Err(_) => println!("Invalid number: {}", input),
        }
    }

    // choose the tree walk strategy
    loop {
        let mut buffer = String::new();
        print!(
            "Algorithm, minimax or alphabeta (default {}): ",
            Algorithm::AlphaBeta
        );
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;

        let input = buffer.trim();
        if input.is_empty() {
            break;
        }
        match input.parse::<Algorithm>() {
            Ok(algorithm) => {
                config.set_algorithm(algorithm);
                break;
            }
            Err(err) => println!("{}", err),
        }
    }

    let mut session = GameSession::new(config);

    println!("\nColumns are numbered 0 to {}, Red moves first.", WIDTH - 1);
    println!("Commands: a column number to drop a piece, 'ply N', 'algo NAME', 'reset', 'quit'\n");
    display(session.board())?;

    // game loop
    loop {
        print!("Move input > ");
        stdout().flush().expect("failed to flush to stdout!");
        let mut input_str = String::new();
        stdin.read_line(&mut input_str)?;
        let input = input_str.trim();

        match input {
            "quit" | "exit" => break,
            "reset" => {
                let events = session.reset();
                show_events(&session, events)?;
            }
            _ if input.starts_with("ply ") => match input["ply ".len()..].trim().parse::<usize>() {
                Ok(ply) => match session.set_ply(ply) {
                    Ok(()) => println!("Search depth set to {} plies", ply),
                    Err(err) => println!("{}", err),
                },
                Err(_) => println!("Invalid number: {}", input["ply ".len()..].trim()),
            },
            _ if input.starts_with("algo ") => {
                match input["algo ".len()..].trim().parse::<Algorithm>() {
                    Ok(algorithm) => {
                        session.set_algorithm(algorithm);
                        println!("Algorithm set to {}", algorithm);
                    }
                    Err(err) => println!("{}", err),
                }
            }
            _ => match input.parse::<usize>() {
                Ok(column) => match session.play(column) {
                    Ok(events) => show_events(&session, events)?,
                    Err(err) => println!("{}", err),
                },
                Err(_) => println!("Invalid number: {}", input),
            },
        }
    }
    Ok(())
}

fn show_events(session: &GameSession, events: Vec<SessionEvent>) -> Result<()> {
    for event in events {
        match event {
            SessionEvent::BoardChanged(board) => display(&board)?,
            SessionEvent::AiMove { result, elapsed } => {
                println!(
                    "AI drops in column {} (score {}, {} nodes)",
                    result.best_move.column, result.score, result.nodes
                );
                println!(
                    "Execution time ({}): {:.2} ms",
                    session.config().algorithm(),
                    elapsed.as_secs_f64() * 1000.0
                );
            }
            SessionEvent::Win(player) => println!("{} wins!", player),
            SessionEvent::Draw => println!("Draw!"),
            SessionEvent::Reset => println!("Starting a new game, Red to move."),
        }
    }
    Ok(())
}

fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (0..WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    for _ in 0..HEIGHT {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    let (origin_x, origin_y) = crossterm::cursor::position()?;

    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            let (pos_x, pos_y) = (
                origin_x + column as u16,
                origin_y - (HEIGHT - 1 - row) as u16,
            );

            stdout.queue(MoveTo(pos_x, pos_y))?.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match board.get(row, column) {
                        Cell::Red => Color::Red,
                        Cell::Yellow => Color::Yellow,
                        Cell::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
    }
    stdout
        .queue(MoveTo(origin_x + WIDTH as u16, origin_y))?
        .queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}
