use super::*;


fn listing(source: &str) -> String {
    let mut symbols = SymbolTable::new();
    match compile(source, &mut symbols, &mut Silent) {
        Ok(program) => program.to_string(),
        Err(error) => error.to_string(),
    }
}

fn run(source: &str, input: &str) -> String {
    let mut r = Runtime::default();
    if let Err(error) = r.enter(source) {
        return error.to_string();
    }
    let mut input = Script::parse(input).unwrap();
    let mut output: Vec<i32> = vec![];
    let mut s = String::new();
    if let Err(error) = r.run(&mut input, &mut output) {
        s.push_str(&format!("{}\n", error));
    }
    let printed: String = output.iter().map(|n| format!("{}\n", n)).collect();
    printed + &s
}
