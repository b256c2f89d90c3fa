// Command handlers - translate input lines into service calls and render
// whatever the core returns. No calculation or persistence logic lives here.
use crate::application::share::format_share_text;
use crate::application::session::SessionMode;
use crate::domain::driver::{Voltage, CUSTOM_PRESET, DRIVER_WATTAGE_PRESETS, POWER_PRESETS};
use crate::domain::history::HistoryEntry;
use crate::domain::units::LengthUnit;
use crate::infrastructure::share_link::share_url;
use crate::presentation::app_state::AppState;

pub enum LoopControl {
    Continue,
    Quit,
}

pub async fn handle_line(state: &mut AppState, line: &str) -> LoopControl {
    let trimmed = line.trim();
    let (command, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    match command {
        "" => {}
        "help" => print_help(),
        "show" => render_session(state),
        "length" => handle_length(state, arg),
        "customer" => {
            state.session.set_customer_name(arg);
            render_session(state);
        }
        "area" => {
            state.session.set_area(arg);
            render_session(state);
        }
        "power" => {
            if !state.session.set_power_per_meter(arg) {
                println!("ignored: '{arg}' is not a non-negative decimal");
            }
            render_session(state);
        }
        "margin" => {
            if !state.session.set_safety_margin(arg) {
                println!("ignored: '{arg}' is not a non-negative decimal");
            }
            render_session(state);
        }
        "wattage" => {
            if !state.session.set_driver_wattage(arg) {
                println!("ignored: '{arg}' is not a non-negative decimal");
            }
            render_session(state);
        }
        "preset" => {
            if !state.session.select_power_preset(arg) {
                print_presets();
            }
            render_session(state);
        }
        "wpreset" => {
            if !state.session.select_driver_wattage_preset(arg) {
                print_presets();
            }
            render_session(state);
        }
        "voltage" => match Voltage::parse(arg) {
            Some(voltage) => {
                state.session.set_voltage(voltage);
                render_session(state);
            }
            None => println!("voltage must be 12V or 24V"),
        },
        "reset" => {
            state.session.reset();
            println!("fields reset");
        }
        "save" => handle_save(state).await,
        "cancel" => {
            state.session.cancel_edit();
            println!("edit cancelled");
        }
        "history" => render_history(&state.history.search("")),
        "search" => render_history(&state.history.search(arg)),
        "load" => match lookup(state, arg) {
            Some(entry) => {
                let entry = entry.clone();
                state.session.load_entry(&entry);
                render_session(state);
            }
            None => println!("no entry with that id"),
        },
        "edit" => match lookup(state, arg) {
            Some(entry) => {
                let entry = entry.clone();
                state.session.begin_edit(&entry);
                render_session(state);
            }
            None => println!("no entry with that id"),
        },
        "delete" => match parse_id(arg) {
            Some(id) => {
                state.history.delete(id).await;
                println!("deleted");
            }
            None => println!("usage: delete <id>"),
        },
        "clear" => {
            state.history.clear().await;
            println!("history cleared");
        }
        "share" => handle_share(state, arg).await,
        "quit" | "exit" => return LoopControl::Quit,
        other => println!("unknown command '{other}', try 'help'"),
    }

    LoopControl::Continue
}

fn handle_length(state: &mut AppState, arg: &str) {
    let (symbol, value) = match arg.split_once(char::is_whitespace) {
        Some((symbol, value)) => (symbol, value.trim()),
        None => (arg, ""),
    };
    let Some(unit) = LengthUnit::parse(symbol) else {
        println!("usage: length <ft|in|cm|m> [value]");
        return;
    };
    if !state.session.edit_length(unit, value) {
        println!("ignored: '{value}' is not a non-negative decimal");
    }
    render_session(state);
}

async fn handle_save(state: &mut AppState) {
    match state.session.mode() {
        SessionMode::Editing { .. } => match state.session.save_changes(&mut state.history).await {
            Some(id) => println!("updated entry {id}"),
            None => println!("nothing to update (missing result or entry)"),
        },
        SessionMode::Idle => match state.session.save_to_history(&mut state.history).await {
            Some(id) => println!("saved as entry {id}"),
            None => println!("nothing to save yet (complete the inputs first)"),
        },
    }
}

async fn handle_share(state: &mut AppState, arg: &str) {
    // sharing a stored entry leaves it untouched; sharing the active session
    // saves it first, then emits the link for what was saved
    if !arg.is_empty() {
        match lookup(state, arg) {
            Some(entry) => println!("{}", share_url(&format_share_text(&entry.snapshot()))),
            None => println!("no entry with that id"),
        }
        return;
    }

    let Some(snapshot) = state.session.snapshot() else {
        println!("nothing to share yet (complete the inputs first)");
        return;
    };
    let text = format_share_text(&snapshot);
    // outside an edit, sharing also saves; the text is captured first so the
    // link reflects what was persisted, not the reset fields
    if state.session.mode() == SessionMode::Idle {
        state.session.save_to_history(&mut state.history).await;
    }
    println!("{}", share_url(&text));
}

fn lookup<'a>(state: &'a AppState, arg: &str) -> Option<&'a HistoryEntry> {
    state.history.get(parse_id(arg)?)
}

fn parse_id(arg: &str) -> Option<i64> {
    arg.parse().ok()
}

fn render_session(state: &AppState) {
    let session = &state.session;

    let editing = match session.mode() {
        SessionMode::Editing { entry_id } => format!(" (editing entry {entry_id})"),
        SessionMode::Idle => String::new(),
    };
    println!("Customer Information{editing}");
    println!("  Customer Name: {}", session.customer().customer_name);
    println!("  Area: {}", session.customer().area);

    println!("Strip Length");
    for unit in LengthUnit::ALL {
        let marker = if session.last_edited() == Some(unit) { "*" } else { " " };
        println!(
            " {marker}{}: {}",
            unit.label(),
            session.converter_values().get(unit)
        );
    }

    let driver = session.driver_values();
    println!("Driver Calculator");
    println!(
        "  Power Consumption: {} W/m (preset: {})",
        driver.power_per_meter, driver.power_preset
    );
    println!(
        "  Driver Wattage: {} W (preset: {})",
        driver.driver_wattage, driver.driver_wattage_preset
    );
    println!("  Voltage: {}", driver.voltage);
    println!("  Safety Margin: {}%", driver.safety_margin);

    let Some(results) = session.results() else {
        return;
    };
    println!("Driver Requirements");
    println!("  Length: {} m", results.length_display());
    println!("  Total Power: {}W", results.total_power_display());
    println!("  Recommended Power: {}W", results.recommended_power_display());
    let drivers = if results.driver_count == 1 { "driver" } else { "drivers" };
    println!(
        "  Suggestion: Use {} {drivers} of {}W {}",
        results.driver_count,
        results.driver_power_display(),
        results.voltage
    );
    match results.efficiency_display() {
        Some(efficiency) => println!("  Efficiency: {efficiency}% (power utilization)"),
        None => println!("  Efficiency: n/a (zero load)"),
    }
}

fn render_history(entries: &[&HistoryEntry]) {
    if entries.is_empty() {
        println!("no saved calculations match");
        return;
    }
    for entry in entries {
        let name = if entry.customer.customer_name.is_empty() {
            "Unnamed Project"
        } else {
            entry.customer.customer_name.as_str()
        };
        println!("{}  {name}", entry.id);
        if !entry.customer.area.is_empty() {
            println!("      {}", entry.customer.area);
        }
        println!(
            "      {} m \u{2022} {}W/m \u{2022} {} drivers",
            entry.converter_values.m,
            entry.driver_values.power_per_meter,
            entry.results.driver_count
        );
        match entry.last_modified {
            Some(modified) => println!(
                "      saved {} (edited {})",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                modified.format("%Y-%m-%d %H:%M")
            ),
            None => println!("      saved {}", entry.timestamp.format("%Y-%m-%d %H:%M")),
        }
    }
}

fn print_presets() {
    println!("power presets:");
    for (value, label) in POWER_PRESETS {
        println!("  {value} - {label}");
    }
    println!("driver wattage presets:");
    for (value, label) in DRIVER_WATTAGE_PRESETS {
        println!("  {value} - {label}");
    }
    println!("  {CUSTOM_PRESET} - keep the typed value");
}

fn print_help() {
    println!("commands:");
    println!("  length <ft|in|cm|m> [value]   set strip length (empty value clears)");
    println!("  customer [name] / area [name] customer info");
    println!("  power <W/m> | preset <tag>    power consumption per meter");
    println!("  wattage <W> | wpreset <tag>   available driver wattage");
    println!("  voltage <12V|24V>             operating voltage");
    println!("  margin <percent>              safety margin");
    println!("  show                          print current fields and results");
    println!("  save                          save (or update while editing)");
    println!("  history | search <term>       list saved calculations");
    println!("  load <id> | edit <id>         copy an entry into the session");
    println!("  cancel                        leave edit mode");
    println!("  delete <id> | clear           remove entries");
    println!("  share [id]                    print a share link");
    println!("  reset                         clear all fields");
    println!("  quit");
}
