//! Named, possibly self-referential grammar rules
//!
//! A [`Rule`] is a parser whose definition is bound after the rule itself was
//! created, so it can appear inside its own definition. Every rule gets a unique
//! id; while it runs, the pair (id, position) is marked in the memo table of the
//! current parse. Reaching the same rule again at the same position before the
//! first run finished can only be left recursion, which would otherwise never
//! terminate, so it is reported as [`Error::LeftRecursion`].

use crate::error::Error;
use crate::input::Input;
use crate::outcome::ParseResult;
use crate::parser::{BoxedParser, Parser};
use log::{debug, trace};
use std::cell::OnceCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_RULE_ID: AtomicUsize = AtomicUsize::new(0);

type Factory<'code, T> = Box<dyn Fn() -> BoxedParser<'code, T> + 'code>;

struct RuleCell<'code, T> {
    definition: OnceCell<BoxedParser<'code, T>>,
    factory: Option<Factory<'code, T>>,
}

impl<'code, T> RuleCell<'code, T> {
    fn new(factory: Option<Factory<'code, T>>) -> Rc<Self> {
        Rc::new(RuleCell {
            definition: OnceCell::new(),
            factory,
        })
    }

    fn resolve(&self) -> Option<BoxedParser<'code, T>> {
        if let Some(definition) = self.definition.get() {
            return Some(definition.clone());
        }
        let built = (self.factory.as_ref()?)();
        Some(self.definition.get_or_init(|| built).clone())
    }
}

enum Slot<'code, T> {
    Owned(Rc<RuleCell<'code, T>>),
    Handle(Weak<RuleCell<'code, T>>),
}

/// Lazily defined parser that guards against left recursion
///
/// Created by [`Rule::declare`] (then bound once with [`Rule::define`]),
/// [`recursive`], or [`Rule::lazy`]. Clones share the definition.
///
/// A handle obtained from [`Rule::handle`] (or passed to the builder of
/// [`recursive`]) does not keep the rule alive. Use it inside the rule's own
/// definition so that the definition does not own its rule.
pub struct Rule<'code, T> {
    id: usize,
    slot: Slot<'code, T>,
}

impl<'code, T> Rule<'code, T> {
    fn with_cell(cell: Rc<RuleCell<'code, T>>) -> Self {
        Rule {
            id: NEXT_RULE_ID.fetch_add(1, Ordering::Relaxed),
            slot: Slot::Owned(cell),
        }
    }

    /// Creates a rule without a definition yet
    pub fn declare() -> Self {
        Rule::with_cell(RuleCell::new(None))
    }

    /// Creates a rule whose parser is built by `factory` on first use
    pub fn lazy<F, P>(factory: F) -> Self
    where
        F: Fn() -> P + 'code,
        P: Parser<'code, Output = T> + 'code,
    {
        Rule::with_cell(RuleCell::new(Some(Box::new(move || factory().boxed()))))
    }

    /// Binds the definition of a declared rule
    ///
    /// Fails with [`Error::RuleAlreadyDefined`] if the rule already has one.
    pub fn define<P>(&self, parser: P) -> Result<(), Error>
    where
        P: Parser<'code, Output = T> + 'code,
    {
        self.cell()?
            .definition
            .set(parser.boxed())
            .map_err(|_| Error::RuleAlreadyDefined { rule: self.name() })
    }

    /// Handle to this rule that does not keep it alive
    pub fn handle(&self) -> Self {
        let weak = match &self.slot {
            Slot::Owned(cell) => Rc::downgrade(cell),
            Slot::Handle(weak) => weak.clone(),
        };
        Rule {
            id: self.id,
            slot: Slot::Handle(weak),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    fn name(&self) -> String {
        format!("rule #{}", self.id)
    }

    fn cell(&self) -> Result<Rc<RuleCell<'code, T>>, Error> {
        match &self.slot {
            Slot::Owned(cell) => Ok(Rc::clone(cell)),
            Slot::Handle(weak) => weak
                .upgrade()
                .ok_or_else(|| Error::UndefinedRule { rule: self.name() }),
        }
    }
}

impl<T> Clone for Rule<'_, T> {
    fn clone(&self) -> Self {
        let slot = match &self.slot {
            Slot::Owned(cell) => Slot::Owned(Rc::clone(cell)),
            Slot::Handle(weak) => Slot::Handle(weak.clone()),
        };
        Rule { id: self.id, slot }
    }
}

impl<T> fmt::Debug for Rule<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("handle", &matches!(self.slot, Slot::Handle(_)))
            .finish()
    }
}

impl<'code, T> Parser<'code> for Rule<'code, T> {
    type Output = T;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, T> {
        let parser = self
            .cell()?
            .resolve()
            .ok_or_else(|| Error::UndefinedRule { rule: self.name() })?;

        let position = input.position();
        if !input.memos().enter(self.id, position) {
            debug!("left recursion: {} re-entered at {input}", self.name());
            return Err(Error::LeftRecursion {
                rule: self.name(),
                position,
                line: input.line(),
                column: input.column(),
            });
        }

        trace!("{}: enter at {position}", self.name());
        let result = parser.run(input.clone());
        input.memos().leave(self.id, position);
        trace!("{}: leave at {position}", self.name());

        result
    }
}

/// Builds a rule that refers to itself
///
/// `build` receives a [`handle`](Rule::handle) to the rule being defined and
/// returns its definition.
///
/// # Examples
/// ```
/// use parsiquery::prelude::*;
/// use parsiquery::primitives::{char, digit};
/// use parsiquery::rule::{Rule, recursive};
///
/// // nested parentheses around a digit: "((1))"
/// let nested: Rule<'_, char> = recursive(|nested| nested.contained(char('('), char(')')).or(digit()));
/// assert_eq!(nested.parse("((1))").unwrap(), '1');
/// ```
pub fn recursive<'code, T, F, P>(build: F) -> Rule<'code, T>
where
    F: FnOnce(Rule<'code, T>) -> P,
    P: Parser<'code, Output = T> + 'code,
{
    let cell = RuleCell::new(None);
    let rule = Rule::with_cell(Rc::clone(&cell));
    let definition = build(rule.handle()).boxed();
    if cell.definition.set(definition).is_err() {
        debug!("{} was defined by its own builder, keeping that definition", rule.name());
    }
    rule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contained::ContainedExt;
    use crate::or::OrExt;
    use crate::primitives::{char, digit, letter};
    use crate::query::{query, query_or};
    use crate::select::SelectExt;
    use crate::token::TokenExt;
    use std::cell::Cell;

    #[test]
    fn test_declare_then_define() {
        let rule = Rule::declare();
        rule.define(letter()).unwrap();
        assert_eq!(rule.parse("x").unwrap(), 'x');
    }

    #[test]
    fn test_define_twice_is_error() {
        let rule = Rule::declare();
        rule.define(letter()).unwrap();
        let error = rule.define(digit()).unwrap_err();
        assert!(matches!(error, Error::RuleAlreadyDefined { .. }));
    }

    #[test]
    fn test_undefined_rule_is_error() {
        let rule: Rule<'_, char> = Rule::declare();
        let error = rule.try_parse("x").unwrap_err();
        assert_eq!(
            error,
            Error::UndefinedRule {
                rule: format!("rule #{}", rule.id())
            }
        );
    }

    #[test]
    fn test_dropped_rule_handle_is_error() {
        let handle = {
            let rule = Rule::declare();
            rule.define(letter()).unwrap();
            rule.handle()
        };
        assert!(matches!(
            handle.try_parse("x"),
            Err(Error::UndefinedRule { .. })
        ));
    }

    #[test]
    fn test_rules_get_distinct_ids() {
        let first: Rule<'_, char> = Rule::declare();
        let second: Rule<'_, char> = Rule::declare();
        assert_ne!(first.id(), second.id());
        assert_eq!(first.clone().id(), first.id());
        assert_eq!(first.handle().id(), first.id());
    }

    #[test]
    fn test_lazy_builds_once() {
        let builds = Rc::new(Cell::new(0));
        let counter = Rc::clone(&builds);
        let rule = Rule::lazy(move || {
            counter.set(counter.get() + 1);
            digit()
        });

        assert_eq!(rule.parse("1").unwrap(), '1');
        assert_eq!(rule.parse("2").unwrap(), '2');
        assert_eq!(builds.get(), 1);
    }

    #[test]
    fn test_recursion_at_advancing_positions() {
        let nested = recursive(|nested| {
            nested
                .contained(char('('), char(')'))
                .select(|depth: usize| depth + 1)
                .or(char('x').select(|_| 0))
        });

        assert_eq!(nested.parse("x").unwrap(), 0);
        assert_eq!(nested.parse("(((x)))").unwrap(), 3);
        let outcome = nested.try_parse("((x)").unwrap();
        assert_eq!(outcome.as_failure().unwrap().position(), 4);
    }

    #[test]
    fn test_rule_can_run_twice_at_same_position() {
        let word = Rule::declare();
        word.define(letter().token()).unwrap();
        let pair = query(|q| Ok((q.run(&word)?, q.run(&word)?)));
        assert_eq!(pair.parse("a b").unwrap(), ('a', 'b'));

        let word_then_bang = word.clone();
        let either = query_or([
            query(move |q| {
                q.run(&word_then_bang)?;
                q.run(char('!'))
            })
            .boxed(),
            word.clone().boxed(),
        ]);
        assert_eq!(either.parse("z").unwrap(), 'z');
    }

    #[test]
    fn test_direct_left_recursion_is_detected() {
        let list = Rule::declare();
        let inner = list.handle();
        list.define(query_or([
            query(move |q| {
                let mut items: Vec<char> = q.run(&inner)?;
                q.run(char(','))?;
                items.push(q.run(char('a'))?);
                Ok(items)
            })
            .boxed(),
            char('a').select(|a| vec![a]).boxed(),
        ]))
        .unwrap();

        let error = list.parse("a,a,a").unwrap_err();
        assert_eq!(
            error,
            Error::LeftRecursion {
                rule: format!("rule #{}", list.id()),
                position: 0,
                line: 1,
                column: 1,
            }
        );
    }
}
