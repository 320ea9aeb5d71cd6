use crate::app::resolve_log_dir;
use crate::cli::{Cli, Command};

use std::path::PathBuf;

use clap::Parser;

#[test]
fn given_move_card_args_when_parsed_then_reads_ids_and_position() {
    let cli = Cli::try_parse_from(["trello", "move-card", "c1", "l2", "--pos", "top"]).unwrap();

    assert_eq!(
        cli.command,
        Command::MoveCard {
            card_id: "c1".to_string(),
            list_id: "l2".to_string(),
            pos: Some("top".to_string()),
        }
    );
    assert!(!cli.verbose);
}

#[test]
fn given_missing_subcommand_when_parsed_then_fails() {
    assert!(Cli::try_parse_from(["trello"]).is_err());
}

#[test]
fn given_log_dir_flag_when_resolving_then_uses_flag() {
    let cli = Cli::try_parse_from(["trello", "--log-dir", "/tmp/trello-logs", "-v", "boards"]).unwrap();

    assert_eq!(resolve_log_dir(&cli).unwrap(), PathBuf::from("/tmp/trello-logs"));
    assert!(cli.verbose);
    assert_eq!(cli.command, Command::Boards);
}
