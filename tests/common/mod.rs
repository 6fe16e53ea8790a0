use assert_cmd::Command;

pub fn stdmark_cmd() -> Command {
    let mut cmd = Command::cargo_bin("stdmark").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}
