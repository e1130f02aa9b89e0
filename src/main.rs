use clap::{load_yaml, App, AppSettings, ArgMatches};
use derive_more::Display;
use fragcanon::gsp::{label_table, parse, GspGraph};
use log::info;
use std::error::Error;

#[derive(Debug, Display, PartialEq)]
enum Err {
    ParseError(String),
    #[display(fmt = "graph {} has fewer than 2 vertices", _0)]
    TooSmall(usize),
}

impl std::error::Error for Err {}

fn read_graphs(matches: &ArgMatches) -> Result<Vec<GspGraph>, Box<dyn Error>> {
    let input = std::fs::read_to_string(matches.value_of("GSP").unwrap())?;
    let graphs = parse(&input).map_err(|e| Err::ParseError(e.to_string()))?;
    info!("read {} graphs", graphs.len());
    Ok(graphs)
}

fn handle_check(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let graphs = read_graphs(matches)?;
    let labels = label_table(&graphs);
    for graph in &graphs {
        if graph.vertices.len() < 2 {
            return Err(Err::TooSmall(graph.id).into());
        }
        let mut state = graph.load(&labels)?;
        let (code, result) = state.check_growth();
        println!(
            "t # {} {} ({} spanning trees)",
            graph.id,
            result,
            state.trees_visited()
        );
        if matches.is_present("code") {
            println!("{}", code);
        }
    }
    Ok(())
}

fn handle_labels(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    print!("{}", label_table(&read_graphs(matches)?));
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let yaml = load_yaml!("cli.yml");
    let matches = App::from_yaml(yaml)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .get_matches();
    if let Some(matches) = matches.subcommand_matches("check") {
        handle_check(matches)?;
    } else if let Some(matches) = matches.subcommand_matches("labels") {
        handle_labels(matches)?;
    }
    Ok(())
}
