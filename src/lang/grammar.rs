use super::token::{Terminal, Word};
use std::collections::{BTreeMap, BTreeSet};

/// ## Grammar symbols
///
/// Everything the parse stack can hold. Action markers are
/// transparent to FIRST and FOLLOW; the driver hands them to the
/// code generator when they reach the top of the stack.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
    Action(Action),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NonTerminal {
    Program,
    StmtList,
    Stmt,
    DeclTail,
    Size,
    ArrayInit,
    InitList,
    InitMore,
    AssignTail,
    ReadTail,
    ElsePart,
    Cond,
    OrTail,
    AndCond,
    AndTail,
    NotCond,
    Rel,
    RelTail,
    Expr,
    ExprTail,
    Term,
    TermTail,
    Factor,
    ArrayRef,
}

/// Semantic actions embedded in the productions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Name in `int name` must be new; remember it.
    Declare,
    DeclareScalar,
    DeclareInit,
    Allocate,
    BeginInit,
    InitItem,
    FinishArray,
    /// Name must already be declared; remember it.
    Use,
    PushVar,
    PushLiteral,
    LoadElement,
    Assign,
    StoreElement,
    ReadScalar,
    ReadElement,
    Print,
    /// Emit the pending conditional jump of `if` and `while`.
    Branch,
    Else,
    EndIf,
    While,
    EndWhile,
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    CompareGt,
    CompareLt,
    CompareEq,
    GenCompare,
    And,
    Or,
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub id: usize,
    pub lhs: NonTerminal,
    pub rhs: Vec<Symbol>,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?} ->", self.lhs)?;
        if self.rhs.is_empty() {
            return write!(f, " ε");
        }
        for sym in &self.rhs {
            match sym {
                Symbol::Terminal(t) => write!(f, " {}", t)?,
                Symbol::NonTerminal(n) => write!(f, " {:?}", n)?,
                Symbol::Action(a) => write!(f, " #{:?}", a)?,
            }
        }
        Ok(())
    }
}

/// ## LL(1) grammar and parse table
///
/// The table is computed from the rule list through FIRST and FOLLOW
/// sets. A cell claimed by two rules is recorded as a conflict and
/// keeps the earlier rule.

#[derive(Debug)]
pub struct Grammar {
    start: NonTerminal,
    rules: Vec<Rule>,
    table: BTreeMap<(NonTerminal, Terminal), usize>,
    conflicts: Vec<(NonTerminal, Terminal)>,
}

impl Default for Grammar {
    fn default() -> Grammar {
        Grammar::new()
    }
}

impl Grammar {
    pub fn new() -> Grammar {
        Grammar::from_rules(NonTerminal::Program, rules())
    }

    pub fn from_rules(start: NonTerminal, rules: Vec<Rule>) -> Grammar {
        let mut grammar = Grammar {
            start,
            rules,
            table: BTreeMap::new(),
            conflicts: vec![],
        };
        grammar.build_table();
        grammar
    }

    pub fn start(&self) -> NonTerminal {
        self.start
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, id: usize) -> Option<&Rule> {
        self.rules.get(id)
    }

    pub fn conflicts(&self) -> &[(NonTerminal, Terminal)] {
        &self.conflicts
    }

    pub fn lookup(&self, nt: NonTerminal, lookahead: Terminal) -> Option<&Rule> {
        let id = self.table.get(&(nt, lookahead))?;
        self.rules.get(*id)
    }

    /// Terminals that select some rule for `nt`.
    pub fn expected(&self, nt: NonTerminal) -> Vec<Terminal> {
        self.table
            .keys()
            .filter(|(n, _)| *n == nt)
            .map(|(_, t)| *t)
            .collect()
    }

    fn nullable(&self) -> BTreeSet<NonTerminal> {
        let mut nullable = BTreeSet::new();
        loop {
            let mut changed = false;
            for rule in &self.rules {
                if nullable.contains(&rule.lhs) {
                    continue;
                }
                let all_nullable = rule.rhs.iter().all(|sym| match sym {
                    Symbol::Terminal(_) => false,
                    Symbol::NonTerminal(n) => nullable.contains(n),
                    Symbol::Action(_) => true,
                });
                if all_nullable {
                    nullable.insert(rule.lhs);
                    changed = true;
                }
            }
            if !changed {
                return nullable;
            }
        }
    }

    fn first_of(
        seq: &[Symbol],
        first: &BTreeMap<NonTerminal, BTreeSet<Terminal>>,
        nullable: &BTreeSet<NonTerminal>,
    ) -> (BTreeSet<Terminal>, bool) {
        let mut set = BTreeSet::new();
        for sym in seq {
            match sym {
                Symbol::Action(_) => continue,
                Symbol::Terminal(t) => {
                    set.insert(*t);
                    return (set, false);
                }
                Symbol::NonTerminal(n) => {
                    if let Some(f) = first.get(n) {
                        set.extend(f.iter().copied());
                    }
                    if !nullable.contains(n) {
                        return (set, false);
                    }
                }
            }
        }
        (set, true)
    }

    fn first_sets(&self, nullable: &BTreeSet<NonTerminal>) -> BTreeMap<NonTerminal, BTreeSet<Terminal>> {
        let mut first: BTreeMap<NonTerminal, BTreeSet<Terminal>> = BTreeMap::new();
        loop {
            let mut changed = false;
            for rule in &self.rules {
                let (set, _) = Grammar::first_of(&rule.rhs, &first, nullable);
                let entry = first.entry(rule.lhs).or_default();
                let before = entry.len();
                entry.extend(set);
                changed |= entry.len() != before;
            }
            if !changed {
                return first;
            }
        }
    }

    fn follow_sets(
        &self,
        first: &BTreeMap<NonTerminal, BTreeSet<Terminal>>,
        nullable: &BTreeSet<NonTerminal>,
    ) -> BTreeMap<NonTerminal, BTreeSet<Terminal>> {
        let mut follow: BTreeMap<NonTerminal, BTreeSet<Terminal>> = BTreeMap::new();
        follow.entry(self.start).or_default().insert(Terminal::End);
        loop {
            let mut changed = false;
            for rule in &self.rules {
                for (index, sym) in rule.rhs.iter().enumerate() {
                    let nt = match sym {
                        Symbol::NonTerminal(n) => *n,
                        _ => continue,
                    };
                    let (mut set, rest_nullable) =
                        Grammar::first_of(&rule.rhs[index + 1..], first, nullable);
                    if rest_nullable {
                        if let Some(f) = follow.get(&rule.lhs) {
                            set.extend(f.iter().copied());
                        }
                    }
                    let entry = follow.entry(nt).or_default();
                    let before = entry.len();
                    entry.extend(set);
                    changed |= entry.len() != before;
                }
            }
            if !changed {
                return follow;
            }
        }
    }

    fn build_table(&mut self) {
        let nullable = self.nullable();
        let first = self.first_sets(&nullable);
        let follow = self.follow_sets(&first, &nullable);
        let mut cells: Vec<((NonTerminal, Terminal), usize)> = vec![];
        for (id, rule) in self.rules.iter().enumerate() {
            let (mut set, rhs_nullable) = Grammar::first_of(&rule.rhs, &first, &nullable);
            if rhs_nullable {
                if let Some(f) = follow.get(&rule.lhs) {
                    set.extend(f.iter().copied());
                }
            }
            for t in set {
                cells.push(((rule.lhs, t), id));
            }
        }
        for (key, id) in cells {
            if self.table.contains_key(&key) {
                self.conflicts.push(key);
            } else {
                self.table.insert(key, id);
            }
        }
    }
}

fn rules() -> Vec<Rule> {
    use self::Action as A;
    use self::NonTerminal as N;
    use self::Terminal as T;

    macro_rules! sym {
        (N($n:ident)) => {
            Symbol::NonTerminal(N::$n)
        };
        (A($a:ident)) => {
            Symbol::Action(A::$a)
        };
        (K($w:ident)) => {
            Symbol::Terminal(T::Word(Word::$w))
        };
        (T($t:ident)) => {
            Symbol::Terminal(T::$t)
        };
    }

    let table: Vec<(NonTerminal, Vec<Symbol>)> = vec![
        (N::Program, vec![sym!(N(StmtList))]),
        (N::StmtList, vec![sym!(N(Stmt)), sym!(N(StmtList))]),
        (N::StmtList, vec![]),
        (
            N::Stmt,
            vec![sym!(K(Int)), sym!(T(Ident)), sym!(A(Declare)), sym!(N(DeclTail))],
        ),
        (N::Stmt, vec![sym!(T(Ident)), sym!(A(Use)), sym!(N(AssignTail))]),
        (
            N::Stmt,
            vec![
                sym!(K(If)),
                sym!(T(LParen)),
                sym!(N(Cond)),
                sym!(T(RParen)),
                sym!(A(Branch)),
                sym!(T(LBrace)),
                sym!(N(StmtList)),
                sym!(T(RBrace)),
                sym!(N(ElsePart)),
                sym!(A(EndIf)),
            ],
        ),
        (
            N::Stmt,
            vec![
                sym!(K(While)),
                sym!(A(While)),
                sym!(T(LParen)),
                sym!(N(Cond)),
                sym!(T(RParen)),
                sym!(A(Branch)),
                sym!(T(LBrace)),
                sym!(N(StmtList)),
                sym!(T(RBrace)),
                sym!(A(EndWhile)),
            ],
        ),
        (
            N::Stmt,
            vec![
                sym!(K(Read)),
                sym!(T(LParen)),
                sym!(T(Ident)),
                sym!(A(Use)),
                sym!(N(ReadTail)),
                sym!(T(RParen)),
                sym!(T(Semicolon)),
            ],
        ),
        (
            N::Stmt,
            vec![
                sym!(K(Print)),
                sym!(T(LParen)),
                sym!(N(Cond)),
                sym!(T(RParen)),
                sym!(A(Print)),
                sym!(T(Semicolon)),
            ],
        ),
        (N::DeclTail, vec![sym!(T(Semicolon)), sym!(A(DeclareScalar))]),
        (
            N::DeclTail,
            vec![
                sym!(T(Equal)),
                sym!(N(Expr)),
                sym!(T(Semicolon)),
                sym!(A(DeclareInit)),
            ],
        ),
        (
            N::DeclTail,
            vec![
                sym!(T(LBracket)),
                sym!(N(Size)),
                sym!(T(RBracket)),
                sym!(A(Allocate)),
                sym!(N(ArrayInit)),
                sym!(T(Semicolon)),
                sym!(A(FinishArray)),
            ],
        ),
        (N::Size, vec![sym!(T(Ident)), sym!(A(Use)), sym!(A(PushVar))]),
        (N::Size, vec![sym!(T(Number)), sym!(A(PushLiteral))]),
        (
            N::ArrayInit,
            vec![
                sym!(T(Equal)),
                sym!(T(LBrace)),
                sym!(A(BeginInit)),
                sym!(N(InitList)),
                sym!(T(RBrace)),
            ],
        ),
        (N::ArrayInit, vec![]),
        (
            N::InitList,
            vec![sym!(N(Expr)), sym!(A(InitItem)), sym!(N(InitMore))],
        ),
        (N::InitList, vec![]),
        (
            N::InitMore,
            vec![
                sym!(T(Comma)),
                sym!(N(Expr)),
                sym!(A(InitItem)),
                sym!(N(InitMore)),
            ],
        ),
        (N::InitMore, vec![]),
        (
            N::AssignTail,
            vec![
                sym!(T(Equal)),
                sym!(N(Expr)),
                sym!(T(Semicolon)),
                sym!(A(Assign)),
            ],
        ),
        (
            N::AssignTail,
            vec![
                sym!(T(LBracket)),
                sym!(N(Expr)),
                sym!(T(RBracket)),
                sym!(T(Equal)),
                sym!(N(Expr)),
                sym!(T(Semicolon)),
                sym!(A(StoreElement)),
            ],
        ),
        (N::ReadTail, vec![sym!(A(ReadScalar))]),
        (
            N::ReadTail,
            vec![
                sym!(T(LBracket)),
                sym!(N(Expr)),
                sym!(T(RBracket)),
                sym!(A(ReadElement)),
            ],
        ),
        (
            N::ElsePart,
            vec![
                sym!(K(Else)),
                sym!(A(Else)),
                sym!(T(LBrace)),
                sym!(N(StmtList)),
                sym!(T(RBrace)),
            ],
        ),
        (N::ElsePart, vec![]),
        (N::Cond, vec![sym!(N(AndCond)), sym!(N(OrTail))]),
        (
            N::OrTail,
            vec![
                sym!(T(Pipe)),
                sym!(N(AndCond)),
                sym!(A(Or)),
                sym!(N(OrTail)),
            ],
        ),
        (N::OrTail, vec![]),
        (N::AndCond, vec![sym!(N(NotCond)), sym!(N(AndTail))]),
        (
            N::AndTail,
            vec![
                sym!(T(Amp)),
                sym!(N(NotCond)),
                sym!(A(And)),
                sym!(N(AndTail)),
            ],
        ),
        (N::AndTail, vec![]),
        (
            N::NotCond,
            vec![sym!(T(Bang)), sym!(N(NotCond)), sym!(A(Not))],
        ),
        (N::NotCond, vec![sym!(N(Rel))]),
        (N::Rel, vec![sym!(N(Expr)), sym!(N(RelTail))]),
        (
            N::RelTail,
            vec![
                sym!(T(Greater)),
                sym!(A(CompareGt)),
                sym!(N(Expr)),
                sym!(A(GenCompare)),
            ],
        ),
        (
            N::RelTail,
            vec![
                sym!(T(Less)),
                sym!(A(CompareLt)),
                sym!(N(Expr)),
                sym!(A(GenCompare)),
            ],
        ),
        (
            N::RelTail,
            vec![
                sym!(T(EqualEqual)),
                sym!(A(CompareEq)),
                sym!(N(Expr)),
                sym!(A(GenCompare)),
            ],
        ),
        (N::RelTail, vec![]),
        (N::Expr, vec![sym!(N(Term)), sym!(N(ExprTail))]),
        (
            N::ExprTail,
            vec![
                sym!(T(Plus)),
                sym!(N(Term)),
                sym!(A(Add)),
                sym!(N(ExprTail)),
            ],
        ),
        (
            N::ExprTail,
            vec![
                sym!(T(Minus)),
                sym!(N(Term)),
                sym!(A(Sub)),
                sym!(N(ExprTail)),
            ],
        ),
        (N::ExprTail, vec![]),
        (N::Term, vec![sym!(N(Factor)), sym!(N(TermTail))]),
        (
            N::TermTail,
            vec![
                sym!(T(Star)),
                sym!(N(Factor)),
                sym!(A(Mul)),
                sym!(N(TermTail)),
            ],
        ),
        (
            N::TermTail,
            vec![
                sym!(T(Slash)),
                sym!(N(Factor)),
                sym!(A(Div)),
                sym!(N(TermTail)),
            ],
        ),
        (N::TermTail, vec![]),
        (
            N::Factor,
            vec![sym!(T(LParen)), sym!(N(Cond)), sym!(T(RParen))],
        ),
        (N::Factor, vec![sym!(T(Tilde)), sym!(N(Factor)), sym!(A(Neg))]),
        (N::Factor, vec![sym!(T(Ident)), sym!(A(Use)), sym!(N(ArrayRef))]),
        (N::Factor, vec![sym!(T(Number)), sym!(A(PushLiteral))]),
        (
            N::ArrayRef,
            vec![
                sym!(T(LBracket)),
                sym!(N(Expr)),
                sym!(T(RBracket)),
                sym!(A(LoadElement)),
            ],
        ),
        (N::ArrayRef, vec![sym!(A(PushVar))]),
    ];

    table
        .into_iter()
        .enumerate()
        .map(|(id, (lhs, rhs))| Rule { id, lhs, rhs })
        .collect()
}
