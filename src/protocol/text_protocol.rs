//! Line-based text front-end and command loop.
//!
//! Reads one command per line, drives a `GameController`, and writes plain
//! text replies. After a human move that hands the turn to the computer, the
//! engine answers right away, including its whole capture chain.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::controller::game_controller::{GameController, MoveOutcome};
use crate::engines::engine_trait::build_engine;
use crate::errors::ProtocolError;
use crate::game_state::checkers_rules::Difficulty;
use crate::game_state::checkers_types::{Move, Player};
use crate::game_state::game_state::TurnPhase;
use crate::move_generation::perft::perft;
use crate::utils::notation::{parse_move, square_to_text, text_to_square};
use crate::utils::render_game_state::render_board;

const HELP: &str = "\
commands:
  new [easy|medium|hard] [white|black]  start a new game
  board                                 show the board
  status                                show whose turn it is
  moves [square]                        list legal moves
  select <square>                       pick a piece and list its targets
  move <from> <to>                      play a move, e.g. move c3 d4
  go                                    let the engine play the side to move
  setoption <name> <value>              engine option (Depth, Threads); kept across 'new'
  perft <depth>                         count positions from here
  help                                  this text
  quit                                  leave";

const MAX_PERFT_DEPTH: u8 = 8;

#[derive(Debug, Clone, Copy)]
pub struct ProtocolOptions {
    pub difficulty: Difficulty,
    pub human_color: Player,
    pub threads: usize,
    pub auto_reply: bool,
}

impl Default for ProtocolOptions {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            human_color: Player::White,
            threads: 1,
            auto_reply: true,
        }
    }
}

pub fn run_stdio_loop(options: ProtocolOptions) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut protocol = TextProtocol::new(options);

    protocol.greet(&mut stdout)?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = protocol.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct TextProtocol {
    controller: GameController,
    options: ProtocolOptions,
    /// Accepted `setoption` pairs, replayed on every new game.
    engine_options: Vec<(String, String)>,
}

impl TextProtocol {
    pub fn new(options: ProtocolOptions) -> Self {
        let mut controller = GameController::new_game(options.difficulty, options.human_color);
        controller.set_engine(build_engine(options.difficulty, options.threads));
        Self {
            controller,
            options,
            engine_options: Vec::new(),
        }
    }

    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Opening banner; lets the engine open when the human plays Black.
    pub fn greet(&mut self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "plum_checkers ready, type 'help' for commands")?;
        self.reply_if_engine_to_move(out)?;
        writeln!(out, "{}", self.controller.status_message())
    }

    /// Handle one line. Returns `true` when the loop should stop.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = parts.collect();

        let result = match cmd.as_str() {
            "quit" | "exit" => return Ok(true),
            "help" => writeln!(out, "{HELP}").map(|()| Ok(())),
            "new" => self.handle_new(&args, out),
            "board" => writeln!(out, "{}", render_board(&self.controller.board_snapshot()))
                .map(|()| Ok(())),
            "status" => self.handle_status(out),
            "moves" => self.handle_moves(&args, out),
            "select" => self.handle_select(&args, out),
            "move" => self.handle_move(&args, out),
            "go" => self.handle_go(out),
            "setoption" => self.handle_setoption(&args, out),
            "perft" => self.handle_perft(&args, out),
            _ => writeln!(out, "error: unknown command '{cmd}'").map(|()| Ok(())),
        };

        if let Err(err) = result? {
            if matches!(err, ProtocolError::Engine(_)) {
                warn!(%err, "engine option refused");
            }
            writeln!(out, "error: {err}")?;
        }
        Ok(false)
    }

    fn handle_new(
        &mut self,
        args: &[&str],
        out: &mut impl Write,
    ) -> io::Result<Result<(), ProtocolError>> {
        let mut difficulty = self.controller.difficulty();
        let mut color = self.controller.human_color();
        for arg in args {
            if let Ok(parsed) = arg.parse::<Difficulty>() {
                difficulty = parsed;
            } else if let Ok(parsed) = arg.parse::<Player>() {
                color = parsed;
            } else {
                return Ok(Err(ProtocolError::InvalidArgument(format!(
                    "unknown difficulty or color '{arg}'"
                ))));
            }
        }

        self.controller.reset(difficulty, color);
        self.controller
            .set_engine(build_engine(difficulty, self.options.threads));
        for (name, value) in &self.engine_options {
            if let Err(err) = apply_engine_option(&mut self.controller, name, value) {
                warn!(%name, %value, %err, "engine option dropped on new game");
            }
        }
        writeln!(out, "new game: {difficulty}, you play {color}")?;
        self.reply_if_engine_to_move(out)?;
        writeln!(out, "{}", self.controller.status_message())?;
        Ok(Ok(()))
    }

    fn handle_status(&self, out: &mut impl Write) -> io::Result<Result<(), ProtocolError>> {
        writeln!(out, "{}", self.controller.status_message())?;
        let phase = match self.controller.phase() {
            TurnPhase::AwaitingSelection => "awaiting selection".to_owned(),
            TurnPhase::AwaitingDestination(pos) => format!("awaiting destination for {pos}"),
            TurnPhase::GameOver(winner) => format!("game over, {winner} won"),
        };
        writeln!(
            out,
            "to move: {}  you: {}  difficulty: {}  phase: {}",
            self.controller.current_player(),
            self.controller.human_color(),
            self.controller.difficulty(),
            phase
        )?;
        if let Some(pos) = self.controller.forced_capture() {
            writeln!(out, "forced capture from {pos}")?;
        }
        Ok(Ok(()))
    }

    fn handle_moves(
        &self,
        args: &[&str],
        out: &mut impl Write,
    ) -> io::Result<Result<(), ProtocolError>> {
        let moves = self.controller.state().legal_moves();
        let listed: Vec<String> = match args.first() {
            Some(square) => {
                let pos = match text_to_square(square) {
                    Ok(pos) => pos,
                    Err(err) => return Ok(Err(err.into())),
                };
                moves
                    .iter_moves()
                    .filter(|mv| mv.start == pos)
                    .map(|mv| mv.to_string())
                    .collect()
            }
            None => moves.iter_moves().map(|mv| mv.to_string()).collect(),
        };

        let label = if moves.must_capture { "captures" } else { "moves" };
        writeln!(out, "{label} ({}): {}", listed.len(), listed.join(" "))?;
        Ok(Ok(()))
    }

    fn handle_select(
        &mut self,
        args: &[&str],
        out: &mut impl Write,
    ) -> io::Result<Result<(), ProtocolError>> {
        let Some(square) = args.first() else {
            return Ok(Err(ProtocolError::Usage("select <square>")));
        };
        let pos = match text_to_square(square) {
            Ok(pos) => pos,
            Err(err) => return Ok(Err(err.into())),
        };
        match self.controller.select_piece(pos) {
            Ok(targets) => {
                let names: Vec<String> = targets.iter().map(|p| p.to_string()).collect();
                writeln!(out, "{pos} can reach: {}", names.join(" "))?;
                Ok(Ok(()))
            }
            Err(err) => {
                warn!(square = %pos, %err, "selection refused");
                Ok(Err(err.into()))
            }
        }
    }

    fn handle_move(
        &mut self,
        args: &[&str],
        out: &mut impl Write,
    ) -> io::Result<Result<(), ProtocolError>> {
        if args.is_empty() {
            return Ok(Err(ProtocolError::Usage("move <from> <to>")));
        }
        let mv = match parse_move(&args.join(" ")) {
            Ok(mv) => mv,
            Err(err) => return Ok(Err(err.into())),
        };

        let outcome = match self.controller.commit_move(mv.start, mv.end) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(%mv, %err, "move refused");
                return Ok(Err(err.into()));
            }
        };
        writeln!(out, "ok {}", describe(&outcome))?;

        if self.options.auto_reply {
            self.reply_if_engine_to_move(out)?;
        }
        writeln!(out, "{}", self.controller.status_message())?;
        Ok(Ok(()))
    }

    fn handle_go(&mut self, out: &mut impl Write) -> io::Result<Result<(), ProtocolError>> {
        let steps = self.controller.play_engine_turn();
        if steps.is_empty() {
            writeln!(out, "engine has no move")?;
        } else {
            writeln!(out, "engine plays {}", turn_text(&steps))?;
        }
        writeln!(out, "{}", self.controller.status_message())?;
        Ok(Ok(()))
    }

    fn handle_setoption(
        &mut self,
        args: &[&str],
        out: &mut impl Write,
    ) -> io::Result<Result<(), ProtocolError>> {
        let [name, value] = args else {
            return Ok(Err(ProtocolError::Usage("setoption <name> <value>")));
        };
        if let Err(err) = apply_engine_option(&mut self.controller, name, value) {
            return Ok(Err(err));
        }
        self.engine_options
            .retain(|(known, _)| !known.eq_ignore_ascii_case(name));
        self.engine_options
            .push(((*name).to_owned(), (*value).to_owned()));
        writeln!(out, "option {name} = {value}")?;
        Ok(Ok(()))
    }

    fn handle_perft(
        &self,
        args: &[&str],
        out: &mut impl Write,
    ) -> io::Result<Result<(), ProtocolError>> {
        let depth = match args.first().map(|d| d.parse::<u8>()) {
            Some(Ok(depth)) if depth <= MAX_PERFT_DEPTH => depth,
            Some(_) => {
                return Ok(Err(ProtocolError::InvalidArgument(format!(
                    "perft depth must be 0..={MAX_PERFT_DEPTH}"
                ))))
            }
            None => return Ok(Err(ProtocolError::Usage("perft <depth>"))),
        };

        let state = self.controller.state();
        let counts = perft(&state.board, state.current_player, state.forced_capture, depth);
        writeln!(
            out,
            "perft {depth}: nodes {} captures {} promotions {}",
            counts.nodes, counts.captures, counts.promotions
        )?;
        Ok(Ok(()))
    }

    fn reply_if_engine_to_move(&mut self, out: &mut impl Write) -> io::Result<()> {
        if self.controller.state().is_human_turn() || self.controller.is_game_over().is_some()
        {
            return Ok(());
        }
        let steps = self.controller.play_engine_turn();
        if !steps.is_empty() {
            writeln!(out, "engine plays {}", turn_text(&steps))?;
        }
        Ok(())
    }
}

/// Engine options go to the engine; `Depth` also sets the game's search depth.
fn apply_engine_option(
    controller: &mut GameController,
    name: &str,
    value: &str,
) -> Result<(), ProtocolError> {
    controller.engine_mut().set_option(name, value)?;
    if name.eq_ignore_ascii_case("Depth") {
        if let Ok(depth) = value.trim().parse() {
            controller.set_search_depth(depth);
        }
    }
    Ok(())
}

fn describe(outcome: &MoveOutcome) -> String {
    let mut text = outcome.mv.to_string();
    if outcome.was_capture {
        text.push_str(" capture");
    }
    if outcome.promoted {
        text.push_str(" promotion");
    }
    if let Some(pos) = outcome.continuation {
        text.push_str(&format!(" continue from {pos}"));
    }
    text
}

/// Steps of one turn as a single path, e.g. `c3e5g7`.
fn turn_text(steps: &[MoveOutcome]) -> String {
    let mut text = String::new();
    for (i, step) in steps.iter().enumerate() {
        let Move { start, end } = step.mv;
        if i == 0 {
            text.push_str(&square_to_text(start).unwrap_or_else(|_| start.to_string()));
        }
        text.push_str(&square_to_text(end).unwrap_or_else(|_| end.to_string()));
    }
    text
}
