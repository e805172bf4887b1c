use intlang::mach::{Event, Runtime, Script};

pub fn exec(source: &str) -> String {
    exec_input(source, "")
}

pub fn exec_input(source: &str, input: &str) -> String {
    exec_n(source, input, 5000)
}

pub fn exec_n(source: &str, input: &str, cycles: usize) -> String {
    let mut runtime = Runtime::default();
    if let Err(error) = runtime.enter(source) {
        return format!("{}\n", error);
    }
    let mut input = match Script::parse(input) {
        Ok(script) => script,
        Err(error) => return format!("{}\n", error),
    };
    let mut output: Vec<i32> = vec![];
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(cycles, &mut input, &mut output);
        for n in output.drain(..) {
            s.push_str(&format!("{}\n", n));
        }
        match event {
            Event::Stopped => break,
            Event::Errors(error) => {
                s.push_str(&format!("{}\n", error));
                break;
            }
            Event::Running => {
                if prev_running {
                    s.push_str(&format!("\n{} Execution cycles exceeded.\n", cycles));
                    break;
                }
                prev_running = true;
            }
        }
    }
    s
}
