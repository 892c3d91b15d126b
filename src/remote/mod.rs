//! Delegating move computation to a solver over TCP.

pub mod client;
pub mod protocol;
pub mod server;

pub use client::{RemoteError, RemoteSolver};
pub use protocol::{ProtocolError, RemoteCommand, DEFAULT_PORT};
pub use server::{RemoteServer, ServerError};

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::{SocketAddr, TcpListener};
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::board::{Cell, STARTING_CELLS};
    use crate::engine::{Engine, EngineConfig};
    use crate::player_move::PlayerMove;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn two_seats() -> [Option<Cell>; 2] {
        [Some(STARTING_CELLS[0]), Some(STARTING_CELLS[1])]
    }

    fn remote_config(address: SocketAddr) -> EngineConfig {
        EngineConfig {
            remote_address: Some(address.to_string()),
            connect_timeout: TIMEOUT,
            seed: Some(11),
            ..EngineConfig::default()
        }
    }

    /// Acks the setup, then answers the first move request with `reply`.
    fn scripted_solver(reply: &'static str) -> (SocketAddr, thread::JoinHandle<Vec<String>>) {
        slow_solver(reply, Duration::ZERO)
    }

    /// Like [`scripted_solver`], waiting `delay` before the move reply.
    fn slow_solver(
        reply: &'static str,
        delay: Duration,
    ) -> (SocketAddr, thread::JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut writer = stream.try_clone().unwrap();
            let mut received = Vec::new();
            for line in BufReader::new(stream).lines() {
                let line = line.unwrap();
                let answer = if line == "g" { reply } else { "ack" };
                if answer == reply {
                    thread::sleep(delay);
                }
                received.push(line);
                // a client that gave up may have closed the socket
                if writeln!(writer, "{}", answer).is_err() {
                    break;
                }
                if answer == reply {
                    break;
                }
            }
            received
        });
        (address, handle)
    }

    #[test]
    fn test_round_trip_through_a_server() {
        let server = RemoteServer::bind("127.0.0.1:0", EngineConfig::default()).unwrap();
        let address = server.local_addr().unwrap();
        let handle = thread::spawn(move || server.accept_one());

        let mut engine = Engine::with_config(0, 10, &two_seats(), remote_config(address)).unwrap();
        assert_eq!(vec!["remote", "search", "greedy"], engine.selector_names());

        let opening = engine.request_move().unwrap();
        assert_eq!(PlayerMove::pawn(0, Cell::new(0, 4), Cell::new(1, 4)), opening);
        engine.on_move_applied(&opening).unwrap();
        engine
            .on_move_applied(&PlayerMove::pawn(1, Cell::new(8, 4), Cell::new(7, 4)))
            .unwrap();
        engine.on_player_invalidated(1).unwrap();

        assert_eq!(vec!["remote", "search", "greedy"], engine.selector_names());
        assert_eq!(
            PlayerMove::pawn(0, Cell::new(1, 4), Cell::new(2, 4)),
            engine.request_move().unwrap()
        );

        drop(engine);
        handle.join().unwrap().unwrap();
    }

    #[test]
    fn test_solver_answers_board_queries() {
        let server = RemoteServer::bind("127.0.0.1:0", EngineConfig::default()).unwrap();
        let address = server.local_addr().unwrap();
        let handle = thread::spawn(move || server.accept_one());

        let mut solver =
            RemoteSolver::connect(&address.to_string(), TIMEOUT, Some(TIMEOUT), 1, 10, &two_seats()).unwrap();
        assert_eq!(
            vec![Cell::new(1, 0), Cell::new(0, 1)],
            solver.adjacent(Cell::new(0, 0)).unwrap()
        );
        let path = solver.path(Cell::new(0, 0), Cell::new(0, 2)).unwrap();
        assert_eq!(vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)], path);
        assert_eq!(
            PlayerMove::pawn(1, Cell::new(8, 4), Cell::new(7, 4)),
            solver.request_move(1).unwrap()
        );

        drop(solver);
        handle.join().unwrap().unwrap();
    }

    #[test]
    fn test_unreachable_solver_falls_back() {
        let address = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let mut engine = Engine::with_config(0, 10, &two_seats(), remote_config(address)).unwrap();
        assert_eq!(vec!["search", "greedy"], engine.selector_names());
        assert_eq!(
            PlayerMove::pawn(0, Cell::new(0, 4), Cell::new(1, 4)),
            engine.request_move().unwrap()
        );
    }

    #[test]
    fn test_malformed_reply_disables_the_solver() {
        let (address, handle) = scripted_solver("nonsense");
        let mut engine = Engine::with_config(0, 10, &two_seats(), remote_config(address)).unwrap();

        let chosen = engine.request_move().unwrap();
        assert_eq!(PlayerMove::pawn(0, Cell::new(0, 4), Cell::new(1, 4)), chosen);
        assert_eq!(vec!["search", "greedy"], engine.selector_names());
        assert_eq!(vec!["1 10 0,4 8,4 ", "g"], handle.join().unwrap());

        // no further traffic once the solver is dropped
        engine.on_move_applied(&chosen).unwrap();
    }

    #[test]
    fn test_illegal_remote_move_disables_the_solver() {
        let (address, handle) = scripted_solver("m 0,4 5,5");
        let mut engine = Engine::with_config(0, 10, &two_seats(), remote_config(address)).unwrap();

        let chosen = engine.request_move().unwrap();
        assert_eq!(PlayerMove::pawn(0, Cell::new(0, 4), Cell::new(1, 4)), chosen);
        assert_eq!(vec!["search", "greedy"], engine.selector_names());
        handle.join().unwrap();
    }

    #[test]
    fn test_slow_solver_outlives_the_connect_timeout() {
        let (address, handle) = slow_solver("m 0,4 0,3", Duration::from_millis(600));
        let config = EngineConfig {
            connect_timeout: Duration::from_millis(200),
            ..remote_config(address)
        };
        let mut engine = Engine::with_config(0, 10, &two_seats(), config).unwrap();

        assert_eq!(
            PlayerMove::pawn(0, Cell::new(0, 4), Cell::new(0, 3)),
            engine.request_move().unwrap()
        );
        assert_eq!(vec!["remote", "search", "greedy"], engine.selector_names());
        handle.join().unwrap();
    }

    #[test]
    fn test_reply_timeout_drops_a_slow_solver() {
        let (address, handle) = slow_solver("m 0,4 0,3", Duration::from_millis(600));
        let config = EngineConfig {
            reply_timeout: Some(Duration::from_millis(100)),
            ..remote_config(address)
        };
        let mut engine = Engine::with_config(0, 10, &two_seats(), config).unwrap();

        assert_eq!(
            PlayerMove::pawn(0, Cell::new(0, 4), Cell::new(1, 4)),
            engine.request_move().unwrap()
        );
        assert_eq!(vec!["search", "greedy"], engine.selector_names());
        drop(engine);
        handle.join().unwrap();
    }

    #[test]
    fn test_server_rejects_moves_before_setup() {
        let server = RemoteServer::bind("127.0.0.1:0", EngineConfig::default()).unwrap();
        let address = server.local_addr().unwrap();
        let handle = thread::spawn(move || server.accept_one());

        let mut stream = std::net::TcpStream::connect(address).unwrap();
        writeln!(stream, "g").unwrap();
        assert!(matches!(
            handle.join().unwrap(),
            Err(ServerError::NotInitialized)
        ));
    }
}
