use anyhow::{bail, Context, Result};
use ezswitch::{Circuit, Pin, SwitchId, SwitchKind, HIGH, LOW};

/// Slot count used when a script has no `capacity` line.
pub const DEFAULT_CAPACITY: usize = 8;

/// Which switch(es) a `poll` or `reset` applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    One(SwitchId),
    All,
}

/// One parsed script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Debounce(i32),
    Strict(bool),
    Switch {
        kind: SwitchKind,
        pin: Pin,
        circuit: Circuit,
    },
    Link {
        id: SwitchId,
        output: Option<Pin>,
        level: bool,
    },
    At(u32),
    Set {
        pin: Pin,
        level: bool,
    },
    Poll(Target),
    Pressed {
        id: SwitchId,
        mirror: bool,
    },
    Reset(Target),
    Print(Option<SwitchId>),
}

/// A parsed switch script: table capacity plus commands with their line
/// numbers.
#[derive(Debug, Clone)]
pub struct Script {
    pub capacity: usize,
    pub commands: Vec<(usize, Command)>,
}

/// Parse a switch script.
///
/// One command per line; `#` starts a comment. An optional
/// `capacity <n>` must come before any other command.
pub fn parse_script(input: &str) -> Result<Script> {
    let mut capacity = None;
    let mut commands = Vec::new();

    for (line_num, line) in input.lines().enumerate() {
        let line_num = line_num + 1;
        let line = match line.split_once('#') {
            Some((code, _)) => code,
            None => line,
        };
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, args)) = words.split_first() else {
            continue;
        };

        if verb == "capacity" {
            if !commands.is_empty() || capacity.is_some() {
                bail!("line {}: capacity must be the first command", line_num);
            }
            let [n] = expect_args::<1>(args, line_num, "capacity <n>")?;
            capacity = Some(parse_num::<usize>(n, line_num, "capacity")?);
            continue;
        }

        let command = parse_command(verb, args, line_num)?;
        commands.push((line_num, command));
    }

    Ok(Script {
        capacity: capacity.unwrap_or(DEFAULT_CAPACITY),
        commands,
    })
}

fn parse_command(verb: &str, args: &[&str], line_num: usize) -> Result<Command> {
    let command = match verb {
        "debounce" => {
            let [ms] = expect_args::<1>(args, line_num, "debounce <ms>")?;
            Command::Debounce(parse_num(ms, line_num, "debounce period")?)
        }
        "strict" => {
            let [mode] = expect_args::<1>(args, line_num, "strict <on|off>")?;
            Command::Strict(match mode {
                "on" => true,
                "off" => false,
                other => bail!("line {}: expected on or off, got {:?}", line_num, other),
            })
        }
        "switch" => {
            let [kind, pin, circuit] =
                expect_args::<3>(args, line_num, "switch <button|toggle> <pin> <c1|c2|c3>")?;
            Command::Switch {
                kind: kind
                    .parse::<SwitchKind>()
                    .with_context(|| format!("line {}: switch kind {:?}", line_num, kind))?,
                pin: parse_num(pin, line_num, "input pin")?,
                circuit: circuit
                    .parse::<Circuit>()
                    .with_context(|| format!("line {}: circuit {:?}", line_num, circuit))?,
            }
        }
        "link" => {
            let [id, output, level] =
                expect_args::<3>(args, line_num, "link <id> <pin|none> <high|low>")?;
            Command::Link {
                id: parse_id(id, line_num)?,
                output: match output {
                    "none" => None,
                    pin => Some(parse_num(pin, line_num, "output pin")?),
                },
                level: parse_level(level, line_num)?,
            }
        }
        "at" => {
            let [ms] = expect_args::<1>(args, line_num, "at <ms>")?;
            Command::At(parse_num(ms, line_num, "time")?)
        }
        "set" => {
            let [pin, level] = expect_args::<2>(args, line_num, "set <pin> <high|low>")?;
            Command::Set {
                pin: parse_num(pin, line_num, "pin")?,
                level: parse_level(level, line_num)?,
            }
        }
        "poll" => {
            let [target] = expect_args::<1>(args, line_num, "poll <id|all>")?;
            Command::Poll(parse_target(target, line_num)?)
        }
        "pressed" => match args {
            [id] => Command::Pressed {
                id: parse_id(id, line_num)?,
                mirror: false,
            },
            [id, "mirror"] => Command::Pressed {
                id: parse_id(id, line_num)?,
                mirror: true,
            },
            _ => bail!("line {}: usage: pressed <id> [mirror]", line_num),
        },
        "reset" => {
            let [target] = expect_args::<1>(args, line_num, "reset <id|all>")?;
            Command::Reset(parse_target(target, line_num)?)
        }
        "print" => match args {
            [] => Command::Print(None),
            [id] => Command::Print(Some(parse_id(id, line_num)?)),
            _ => bail!("line {}: usage: print [id]", line_num),
        },
        other => bail!("line {}: unknown command {:?}", line_num, other),
    };
    Ok(command)
}

fn expect_args<'a, const N: usize>(
    args: &[&'a str],
    line_num: usize,
    usage: &str,
) -> Result<[&'a str; N]> {
    match <[&str; N]>::try_from(args) {
        Ok(args) => Ok(args),
        Err(_) => bail!("line {}: usage: {}", line_num, usage),
    }
}

fn parse_num<T: std::str::FromStr>(word: &str, line_num: usize, what: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    word.parse()
        .with_context(|| format!("line {}: invalid {} {:?}", line_num, what, word))
}

fn parse_id(word: &str, line_num: usize) -> Result<SwitchId> {
    parse_num::<u8>(word, line_num, "switch id").map(SwitchId::new)
}

fn parse_target(word: &str, line_num: usize) -> Result<Target> {
    if word == "all" {
        Ok(Target::All)
    } else {
        parse_id(word, line_num).map(Target::One)
    }
}

fn parse_level(word: &str, line_num: usize) -> Result<bool> {
    if word.eq_ignore_ascii_case("high") {
        Ok(HIGH)
    } else if word.eq_ignore_ascii_case("low") {
        Ok(LOW)
    } else {
        bail!("line {}: expected high or low, got {:?}", line_num, word)
    }
}
