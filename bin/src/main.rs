use clap::{Parser, Subcommand};
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rs_wordle_filter::*;
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io;
use std::io::Write;
use std::time::Instant;

/// Plays a Wordle game in reverse: the computer guesses the word, and filters its word list with
/// the feedback from each round.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to a file that contains a list of possible words, with one word on each line.
    #[clap(short = 'f', long)]
    words_file: String,

    /// The length of the words in the game. Words of other lengths in the words file are ignored.
    #[clap(long, default_value_t = 5)]
    length: usize,

    /// Seeds the random choice of guesses, so that runs can be reproduced.
    #[clap(long)]
    seed: Option<u64>,

    /// The number of guesses allowed in each game.
    #[clap(long, default_value_t = MAX_ROUNDS)]
    max_rounds: u32,

    /// If set, writes the words of the chosen length to this file, one per line. The file can be
    /// passed to `--words-file` on later runs.
    #[clap(long)]
    save_words: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game against every word in the given words file.
    Benchmark,
    /// Run a single game with the given word.
    Single { word: String },
    /// Guess the word in a game that is being played elsewhere.
    Interactive,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let start_time = Instant::now();
    let args = Args::parse();
    println!("File: {}", args.words_file);

    let words_reader = io::BufReader::new(File::open(&args.words_file)?);
    let word_bank = WordBank::from_reader(words_reader, args.length)?;
    println!(
        "There are {} possible words of length {}.",
        word_bank.len(),
        word_bank.word_length()
    );

    if let Some(save_words) = &args.save_words {
        word_bank.write_to(io::BufWriter::new(File::create(save_words)?))?;
        println!("Saved {} words to {}.", word_bank.len(), save_words);
    }

    let config = SessionConfig {
        max_rounds: args.max_rounds,
    };
    match args.command {
        Command::Benchmark => run_benchmark(&word_bank, args.seed, &config)?,
        Command::Single { word } => play_single_game(&word, &word_bank, args.seed, &config)?,
        Command::Interactive => play_interactive_game(&word_bank, args.seed, &config)?,
    }

    println!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn new_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn run_benchmark(
    word_bank: &WordBank,
    seed: Option<u64>,
    config: &SessionConfig,
) -> Result<(), WordleError> {
    let mut num_guesses_per_game: Vec<u32> = Vec::new();
    let mut num_failures = 0;
    let mut rng = new_rng(seed);
    for word in word_bank.iter() {
        let game_rng = StdRng::seed_from_u64(rand::Rng::gen(&mut rng));
        let mut pool = CandidatePool::with_rng(word_bank.iter(), game_rng)?;
        let mut game = SimulatedGame::new(word, word_bank);
        match play_session(&mut pool, &mut game, config)? {
            SessionOutcome::Won(guesses) => num_guesses_per_game.push(guesses.len() as u32),
            SessionOutcome::Exhausted(guesses) => {
                warn!("Failed to guess {} after {:?}", word, guesses);
                num_failures += 1;
            }
        }
    }
    println!(
        "Solved {} of {} words. Results:",
        num_guesses_per_game.len(),
        word_bank.len()
    );

    let mut num_games_per_round: HashMap<u32, u32> = HashMap::new();
    for num_guesses in num_guesses_per_game.iter() {
        *(num_games_per_round.entry(*num_guesses).or_insert(0)) += 1;
    }

    println!("|Num guesses|Num games|");
    println!("|-----------|---------|");
    let mut num_rounds = num_games_per_round.keys().copied().collect::<Vec<u32>>();
    num_rounds.sort_unstable();
    for num_round in num_rounds.iter() {
        println!("|{}|{}|", num_round, num_games_per_round[num_round]);
    }
    println!("|failed|{}|", num_failures);

    if num_guesses_per_game.is_empty() {
        return Ok(());
    }
    let average: f64 = num_guesses_per_game.iter().sum::<u32>() as f64
        / num_guesses_per_game.len() as f64;
    let std_dev: f64 = (num_guesses_per_game
        .iter()
        .map(|num_guesses| (*num_guesses as f64 - average).powi(2))
        .sum::<f64>()
        / num_guesses_per_game.len() as f64)
        .sqrt();

    println!(
        "\n**Average number of guesses in solved games:** {:.2} +/- {:.2}",
        average, std_dev
    );
    Ok(())
}

fn play_single_game(
    word: &str,
    word_bank: &WordBank,
    seed: Option<u64>,
    config: &SessionConfig,
) -> Result<(), WordleError> {
    let word = word.to_ascii_lowercase();
    if !word_bank.contains(&word) {
        eprintln!("Error: given word not in the word list.");
        std::process::exit(1);
    }
    let mut pool = CandidatePool::with_rng(word_bank.iter(), new_rng(seed))?;
    let mut game = SimulatedGame::new(&word, word_bank);
    match play_session(&mut pool, &mut game, config)? {
        SessionOutcome::Won(guesses) => {
            println!("Solved it! It took me {} guesses.", guesses.len());
            for guess in guesses.iter() {
                println!("\t{}", guess);
            }
        }
        SessionOutcome::Exhausted(guesses) => {
            println!(
                "I still couldn't solve it after {} guesses :(",
                guesses.len()
            );
            for guess in guesses.iter() {
                println!("\t{}", guess);
            }
        }
    }
    Ok(())
}

fn play_interactive_game(
    word_bank: &WordBank,
    seed: Option<u64>,
    config: &SessionConfig,
) -> Result<(), WordleError> {
    let mut pool = CandidatePool::with_rng(word_bank.iter(), new_rng(seed))?;
    println!("Choose a word from the word-list. Press enter once you've chosen.");

    {
        let mut buffer = String::new();
        io::stdin().read_line(&mut buffer)?;
    }

    println!(
        "I will now try to guess your word.\n\n\
         For each guess, enter the correctness of each letter as:\n\n\
           * '.' = this letter is not in the word\n\
           * 'y' = this letter is in the word, but not in this location\n\
           * 'g' = this letter is in the word and in the right location\n\
           * '?' = you don't know.\n\n\
         For example, if your word was \"spade\" and the guess was \"soapy\", you would enter \"g.gy.\"\n\
         If the game didn't accept my guess as a word, enter \"!\".");

    let mut source = InteractiveSource::new();
    match play_session(&mut pool, &mut source, config)? {
        SessionOutcome::Won(guesses) => {
            println!("I did it! It took me {} guesses.", guesses.len())
        }
        SessionOutcome::Exhausted(_) if pool.is_empty() => {
            println!("I'm out of words. Did something go wrong? :(")
        }
        SessionOutcome::Exhausted(_) => println!("I couldn't guess it :("),
    }

    Ok(())
}

/// Asks the user for the game's feedback on each guess.
struct InteractiveSource {
    keyboard: Keyboard,
}

impl InteractiveSource {
    fn new() -> Self {
        InteractiveSource {
            keyboard: Keyboard::new(),
        }
    }
}

impl FeedbackSource for InteractiveSource {
    fn submit(&mut self, guess: &str) -> Result<Submission, WordleError> {
        println!("I'm guessing: {}. How did I do?", guess);
        loop {
            match read_evaluations(guess)? {
                Input::NotAWord => return Ok(Submission::NotAWord),
                Input::Evaluations(evaluations) => {
                    if let Err(error) = self.keyboard.record(guess, &evaluations) {
                        println!("{}. Try again.", error);
                        continue;
                    }
                    let mut feedback = GuessFeedback::from_evaluations(guess, &evaluations)?;
                    feedback.add_globally_absent(self.keyboard.absent_letters().iter().copied());
                    return Ok(Submission::Evaluated(feedback));
                }
                Input::Invalid(message) => println!("{} Try again.", message),
            }
        }
    }
}

enum Input {
    NotAWord,
    Evaluations(Vec<TileEvaluation>),
    Invalid(String),
}

fn read_evaluations(guess: &str) -> io::Result<Input> {
    io::stdout().flush()?;
    let mut buffer = String::new();
    if io::stdin().read_line(&mut buffer)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no more input",
        ));
    }
    Ok(parse_evaluations(guess, buffer.trim()))
}

fn parse_evaluations(guess: &str, input: &str) -> Input {
    if input == "!" {
        return Input::NotAWord;
    }
    if guess.chars().count() != input.chars().count() {
        return Input::Invalid(format!(
            "Input {} didn't match the length of my guess.",
            input
        ));
    }
    input
        .chars()
        .map(|letter| match letter {
            '.' => Some(TileEvaluation::Absent),
            'y' => Some(TileEvaluation::Present),
            'g' => Some(TileEvaluation::Correct),
            '?' => Some(TileEvaluation::Unknown),
            _ => None,
        })
        .collect::<Option<Vec<TileEvaluation>>>()
        .map_or_else(
            || Input::Invalid(String::from("Must enter only the letters '.', 'y', 'g' or '?'.")),
            Input::Evaluations,
        )
}
