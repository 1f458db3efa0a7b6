use clap::arg;
use clap::command;
use clap::ArgMatches;
use clap::Command;

use hotseat::game::{Game, GameConfig, ScriptedSquares};
use hotseat::ui::console::ConsoleSquares;
use hotseat::ui::{self, RenderOptions};

use std::io::stdout;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = with_game_args(command!())
        .propagate_version(true)
        .arg(arg!(
            -d --debug "Turn debugging information on"
        ).global(true))
        .subcommand(with_game_args(Command::new("play").about("Play a game at the terminal")))
        .subcommand(
            with_game_args(Command::new("replay").about("Feed scripted squares through the rounds")).arg(
                arg!(
                -m --moves <INTS> "Row and column tokens, four per move; any non-integer requests an undo"
                        )
                .num_args(1..)
                .allow_hyphen_values(true)
                .value_parser(clap::value_parser!(String)),
            ),
        )
        .get_matches();

    init_tracing(matches.get_flag("debug"));

    match matches.subcommand() {
        Some(("play", arg_matches)) => {
            play(arg_matches);
        }
        Some(("replay", arg_matches)) => {
            let moves = arg_matches
                .get_many::<String>("moves")
                .unwrap_or_default()
                .cloned()
                .collect::<Vec<_>>();
            replay(arg_matches, moves);
        }
        None => {
            play(&matches);
        }
        _ => unreachable!("Exhausted list of subcommands"),
    }
}

fn with_game_args(command: Command) -> Command {
    command
        .arg(
            arg!(--"p1-color" <COLOR> "Color of player one")
                .env("HOTSEAT_P1_COLOR")
                .default_value("BLACK"),
        )
        .arg(
            arg!(--"p2-color" <COLOR> "Color of player two")
                .env("HOTSEAT_P2_COLOR")
                .default_value("WHITE"),
        )
        .arg(arg!(--"restore-flags-on-undo" "Undo also resets the moved piece's first-move flags"))
        .arg(arg!(--"no-color" "Print pieces without ANSI colors"))
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn game_settings(matches: &ArgMatches) -> (GameConfig, RenderOptions) {
    let config = GameConfig::with_color_names(
        color_arg(matches, "p1-color"),
        color_arg(matches, "p2-color"),
        matches.get_flag("restore-flags-on-undo"),
    );
    let options = RenderOptions {
        ansi: !matches.get_flag("no-color"),
    };
    (config, options)
}

fn color_arg<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches.get_one::<String>(id).map(String::as_str).unwrap_or_default()
}

fn play(matches: &ArgMatches) {
    let (config, options) = game_settings(matches);
    let mut game = Game::new(config);
    let mut input = ConsoleSquares::stdio();

    ui::run_rounds(&mut game, &mut input, &mut stdout(), options);
    println!("{}", ui::render_history(&game));
}

fn replay(matches: &ArgMatches, moves: Vec<String>) {
    let (config, options) = game_settings(matches);
    let mut game = Game::new(config);
    let mut input = ScriptedSquares::new(moves);

    let rounds = ui::run_rounds(&mut game, &mut input, &mut stdout(), options);
    println!("{} rounds played", rounds);
    println!("{}", ui::render_history(&game));
}
