// src/uci/mod.rs

//! UCI front end.
//!
//! Standard input is read on its own thread and fed through a channel so a
//! `stop` or `quit` can reach the engine while a search runs. The search runs
//! on a worker thread that owns the engine for its duration and hands it back
//! together with the chosen move.

use crate::constants::{CLOCK_DIVISOR, ENGINE_AUTHOR, ENGINE_NAME, MAX_DEPTH};
use crate::engine::Engine;
use crate::game::search::session::StopHandle;
use crate::game::search::{mate_distance, SearchInfo};
use crossbeam_channel::{select, unbounded, Receiver, Sender};
use shakmaty::Color;
use std::io::{self, BufRead, Write};
use std::thread;
use tracing::{debug, warn};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<i32>,
    pub movetime: Option<u64>,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub infinite: bool,
}

impl GoParams {
    /// Time to spend on this move, in milliseconds. `None` when the search
    /// should only be bounded by depth or a `stop`.
    pub fn budget_ms(&self, turn: Color, default_ms: u64) -> Option<u64> {
        if let Some(movetime) = self.movetime {
            return Some(movetime);
        }
        let clock = match turn {
            Color::White => self.wtime,
            Color::Black => self.btime,
        };
        if let Some(remaining) = clock {
            return Some(remaining / CLOCK_DIVISOR);
        }
        if self.infinite || self.depth.is_some() {
            return None;
        }
        Some(default_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Uci,
    IsReady,
    NewGame,
    Position { fen: Option<String>, moves: Vec<String> },
    Go(GoParams),
    Stop,
    Quit,
}

/// Parses one input line. Empty lines give `Ok(None)`; unknown or malformed
/// commands give an error message.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return Ok(None);
    };
    let command = match head {
        "uci" => Command::Uci,
        "isready" => Command::IsReady,
        "ucinewgame" => Command::NewGame,
        "stop" => Command::Stop,
        "quit" => Command::Quit,
        "position" => parse_position(tokens.collect())?,
        "go" => Command::Go(parse_go(tokens.collect())?),
        other => return Err(format!("unknown command `{}`", other)),
    };
    Ok(Some(command))
}

fn parse_position(tokens: Vec<&str>) -> Result<Command, String> {
    let moves_at = tokens.iter().position(|&t| t == "moves");
    let (setup, moves) = match moves_at {
        Some(i) => (&tokens[..i], &tokens[i + 1..]),
        None => (&tokens[..], &[][..]),
    };
    let fen = match setup.split_first() {
        Some((&"startpos", [])) => None,
        Some((&"fen", fields)) if !fields.is_empty() => Some(fields.join(" ")),
        _ => return Err(format!("malformed position command `{}`", tokens.join(" "))),
    };
    Ok(Command::Position {
        fen,
        moves: moves.iter().map(|m| m.to_string()).collect(),
    })
}

fn parse_go(tokens: Vec<&str>) -> Result<GoParams, String> {
    let mut params = GoParams::default();
    let mut iter = tokens.into_iter();
    while let Some(token) = iter.next() {
        match token {
            "infinite" => params.infinite = true,
            "depth" | "movetime" | "wtime" | "btime" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("missing value for `{}`", token))?;
                let number: i64 = value
                    .parse()
                    .map_err(|_| format!("bad value `{}` for `{}`", value, token))?;
                let millis = number.max(0) as u64;
                match token {
                    "depth" => params.depth = Some(number.clamp(1, MAX_DEPTH as i64) as i32),
                    "movetime" => params.movetime = Some(millis),
                    "wtime" => params.wtime = Some(millis),
                    _ => params.btime = Some(millis),
                }
            }
            // winc, binc, movestogo and friends carry a value we do not use.
            "winc" | "binc" | "movestogo" | "nodes" | "mate" => {
                iter.next();
            }
            other => debug!(token = other, "ignoring go token"),
        }
    }
    Ok(params)
}

pub fn format_info(info: &SearchInfo) -> String {
    let score = match mate_distance(info.score) {
        Some(moves) => format!("mate {}", moves),
        None => format!("cp {}", info.score),
    };
    let millis = info.elapsed.as_millis() as u64;
    let nps = info.nodes * 1000 / millis.max(1);
    let mut line = format!(
        "info depth {} score {} nodes {} nps {} time {} hashfull {}",
        info.depth, score, info.nodes, nps, millis, info.hashfull
    );
    if !info.pv.is_empty() {
        line.push_str(" pv ");
        line.push_str(&info.pv.join(" "));
    }
    line
}

enum Flow {
    Continue,
    Quit,
}

type Finished = (Engine, Option<String>);

pub struct UciLoop<W: Write> {
    engine: Option<Engine>,
    unbounded_search: bool,
    stop: StopHandle,
    out: W,
    info_rx: Receiver<SearchInfo>,
    done_tx: Sender<Finished>,
    done_rx: Receiver<Finished>,
}

impl<W: Write> UciLoop<W> {
    pub fn new(mut engine: Engine, out: W) -> Self {
        let (info_tx, info_rx) = unbounded();
        let (done_tx, done_rx) = unbounded();
        engine.set_reporter(info_tx);
        Self {
            stop: engine.stop_handle(),
            engine: Some(engine),
            unbounded_search: false,
            out,
            info_rx,
            done_tx,
            done_rx,
        }
    }

    /// Runs until `quit` or the end of input and returns the writer. At the
    /// end of input a running search is allowed to finish unless it has
    /// neither a depth nor a time limit; `quit` always stops it.
    pub fn run<R: BufRead + Send + 'static>(mut self, input: R) -> io::Result<W> {
        let (line_tx, line_rx) = unbounded::<String>();
        thread::spawn(move || {
            for line in input.lines() {
                let Ok(line) = line else { break };
                if line_tx.send(line).is_err() {
                    break;
                }
            }
        });

        let info_rx = self.info_rx.clone();
        let done_rx = self.done_rx.clone();
        loop {
            select! {
                recv(line_rx) -> line => match line {
                    Ok(line) => {
                        if let Flow::Quit = self.handle_line(&line)? {
                            self.stop.stop();
                            break;
                        }
                    }
                    Err(_) => {
                        if self.unbounded_search {
                            self.stop.stop();
                        }
                        break;
                    }
                },
                recv(info_rx) -> info => {
                    if let Ok(info) = info {
                        self.send(&format_info(&info))?;
                    }
                }
                recv(done_rx) -> done => {
                    if let Ok(finished) = done {
                        self.finish_search(finished)?;
                    }
                }
            }
        }

        if self.engine.is_none() {
            if let Ok(finished) = done_rx.recv() {
                self.finish_search(finished)?;
            }
        }
        Ok(self.out)
    }

    fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(message) => {
                warn!(%message, "ignoring input");
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "received");

        match command {
            Command::Uci => {
                self.send(&format!("id name {}", ENGINE_NAME))?;
                self.send(&format!("id author {}", ENGINE_AUTHOR))?;
                self.send("uciok")?;
            }
            Command::IsReady => self.send("readyok")?,
            Command::Stop => self.stop.stop(),
            Command::Quit => return Ok(Flow::Quit),
            Command::NewGame => match self.engine.as_mut() {
                Some(engine) => engine.new_game(),
                None => warn!("ucinewgame ignored while searching"),
            },
            Command::Position { fen, moves } => match self.engine.as_mut() {
                Some(engine) => set_position(engine, fen.as_deref(), &moves),
                None => warn!("position ignored while searching"),
            },
            Command::Go(params) => self.start_search(&params)?,
        }
        Ok(Flow::Continue)
    }

    fn start_search(&mut self, params: &GoParams) -> io::Result<()> {
        let Some(mut engine) = self.engine.take() else {
            warn!("go ignored, a search is already running");
            return Ok(());
        };
        if engine.board().legal_moves().is_empty() {
            self.engine = Some(engine);
            return self.send("bestmove 0000");
        }

        let depth = match params.depth {
            Some(depth) => depth,
            None if params.infinite => MAX_DEPTH,
            None => engine.config().default_depth,
        };
        let budget = params.budget_ms(engine.board().turn(), engine.config().default_time_ms);
        engine.set_time_budget(budget.unwrap_or(u64::MAX));
        self.unbounded_search = params.infinite && budget.is_none();
        debug!(depth, budget_ms = ?budget, "starting search");

        self.stop.reset();
        let done_tx = self.done_tx.clone();
        thread::spawn(move || {
            let best = engine.search(depth).map(|m| engine.move_to_uci(m));
            let _ = done_tx.send((engine, best));
        });
        Ok(())
    }

    fn finish_search(&mut self, (engine, best): Finished) -> io::Result<()> {
        // Reports sent before the search returned come first.
        let pending: Vec<SearchInfo> = self.info_rx.try_iter().collect();
        for info in &pending {
            self.send(&format_info(info))?;
        }
        self.engine = Some(engine);
        let best = best.unwrap_or_else(|| "0000".to_string());
        self.send(&format!("bestmove {}", best))
    }

    fn send(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }
}

fn set_position(engine: &mut Engine, fen: Option<&str>, moves: &[String]) {
    match fen {
        // A rejected FEN leaves the start position, and the moves still apply.
        Some(fen) => {
            let _ = engine.set_position(fen);
        }
        None => engine.set_start_position(),
    }
    for text in moves {
        if let Err(err) = engine.apply_external_move(text) {
            warn!(%err, "dropping the remaining moves");
            return;
        }
    }
}
