#[cfg(test)]
pub mod test {
    use anyhow::Result;

    use crate::board::{Board, Player};
    use crate::search::{Algorithm, SearchConfig, Searcher};
    use crate::session::{GameSession, SessionEvent};
    use crate::{HEIGHT, WIDTH};

    // openings, stacks, midgames and mutual-threat positions, as move
    // strings played alternately from Red
    const POSITIONS: [&str; 14] = [
        "",
        "3",
        "34",
        "334",
        "3344",
        "33333",
        "333333",
        "5051626",
        "102030",
        "707275",
        "001122",
        "32425610",
        "6655442",
        "01234567",
    ];

    fn count_pieces(board: &Board, player: Player) -> usize {
        let mut count = 0;
        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                if board.get(row, column) == player.cell() {
                    count += 1;
                }
            }
        }
        count
    }

    fn assert_gravity(board: &Board) {
        for column in 0..WIDTH {
            let mut seen_piece = false;
            for row in 0..HEIGHT {
                match board.get(row, column) {
                    crate::Cell::Empty => {
                        assert!(!seen_piece, "gap below a piece in column {}", column)
                    }
                    _ => seen_piece = true,
                }
            }
        }
    }

    /// Plain minimax and alpha-beta must land on the same move and score
    /// in every position at every depth; pruning may only shrink the node
    /// count
    #[test]
    pub fn pruning_never_changes_the_move() -> Result<()> {
        let mut plain_nodes = 0usize;
        let mut pruned_nodes = 0usize;
        let mut searches = 0usize;

        for moves in POSITIONS.iter() {
            for &player in [Player::Red, Player::Yellow].iter() {
                for ply in 1..=4 {
                    let mut plain = Searcher::new(SearchConfig::new(ply, Algorithm::Minimax)?);
                    let mut pruned = Searcher::new(SearchConfig::new(ply, Algorithm::AlphaBeta)?);

                    let mut board = Board::from_moves(moves)?;
                    let full = plain.choose_move(&mut board, player)?;
                    let cut = pruned.choose_move(&mut board, player)?;

                    assert_eq!(
                        full.best_move, cut.best_move,
                        "position '{}', ply {}, {} to move",
                        moves,
                        ply,
                        player.name()
                    );
                    assert_eq!(
                        full.score, cut.score,
                        "position '{}', ply {}, {} to move",
                        moves,
                        ply,
                        player.name()
                    );
                    assert!(
                        cut.nodes <= full.nodes,
                        "position '{}', ply {}, {} to move",
                        moves,
                        ply,
                        player.name()
                    );

                    // probing must leave the position as it was
                    assert_eq!(board, Board::from_moves(moves)?);

                    plain_nodes += full.nodes;
                    pruned_nodes += cut.nodes;
                    searches += 1;
                }
            }
        }

        println!(
            "{} searches: {} nodes plain, {} nodes pruned",
            searches, plain_nodes, pruned_nodes
        );
        Ok(())
    }

    /// The same position and parameters always search to the same result
    #[test]
    pub fn search_is_deterministic() -> Result<()> {
        for moves in POSITIONS.iter() {
            let mut board = Board::from_moves(moves)?;
            let mut searcher = Searcher::new(SearchConfig::default());

            let first = searcher.choose_move(&mut board, Player::Yellow)?;
            for _ in 0..2 {
                let repeat = searcher.choose_move(&mut board, Player::Yellow)?;
                assert_eq!(first, repeat, "position '{}'", moves);
            }
        }
        Ok(())
    }

    /// Node counts follow the tree shape exactly when nothing prunes
    #[test]
    pub fn plain_search_counts_every_node() -> Result<()> {
        let mut board = Board::new();

        let mut searcher = Searcher::new(SearchConfig::new(1, Algorithm::Minimax)?);
        let result = searcher.choose_move(&mut board, Player::Yellow)?;
        assert_eq!(result.nodes, WIDTH);
        assert_eq!(searcher.node_count, WIDTH);

        // two plies on an empty board: every reply to every opening
        let mut searcher = Searcher::new(SearchConfig::new(2, Algorithm::Minimax)?);
        let result = searcher.choose_move(&mut board, Player::Yellow)?;
        assert_eq!(result.nodes, WIDTH + WIDTH * WIDTH);
        Ok(())
    }

    /// A fixed column script against the engine: whatever happens, the
    /// session bookkeeping holds after every turn and the game concludes
    #[test]
    pub fn scripted_game_stays_consistent() -> Result<()> {
        let mut session = GameSession::new(SearchConfig::default());
        let script = [3usize, 4, 2, 5, 0, 1, 6, 7];

        for &column in script.iter().cycle().take(100) {
            let events = match session.play(column) {
                // the scripted column filled up, try the next one
                Err(_) => continue,
                Ok(events) => events,
            };

            match events.first() {
                Some(SessionEvent::BoardChanged(_)) => {}
                other => panic!("turn did not begin with a board change: {:?}", other),
            }
            assert_gravity(session.board());
            assert_eq!(session.current_player(), Player::Red);

            let concluded = events.iter().any(|event| match event {
                SessionEvent::Win(_) | SessionEvent::Draw => true,
                _ => false,
            });
            if concluded {
                // the session is already back at an empty board
                assert_eq!(session.board(), &Board::new());
                return Ok(());
            }

            // otherwise the engine has answered and the piece counts match
            assert_eq!(
                count_pieces(session.board(), Player::Red),
                count_pieces(session.board(), Player::Yellow)
            );
        }

        panic!("game never concluded");
    }

    /// Search settings may change between turns without upsetting a game
    /// in progress
    #[test]
    pub fn settings_can_flip_mid_game() -> Result<()> {
        let mut session = GameSession::new(SearchConfig::new(2, Algorithm::Minimax)?);

        session.play(3)?;
        session.set_algorithm(Algorithm::AlphaBeta);
        session.play(4)?;
        session.set_ply(3)?;
        session.play(2)?;

        assert_eq!(session.config().ply(), 3);
        assert_eq!(session.config().algorithm(), Algorithm::AlphaBeta);
        assert_eq!(
            count_pieces(session.board(), Player::Red),
            count_pieces(session.board(), Player::Yellow)
        );
        Ok(())
    }
}
