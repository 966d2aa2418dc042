use itertools::Itertools;

use crate::prelude::*;

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

impl<S: Symbol> Dfa<S> {
    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    /// Parallel transitions between two states are merged into one edge whose label lists the symbols.
    pub fn dot_representation(&self) -> String {
        let header = [
            "digraph DFA {".to_string(),
            "init [label=\"\", shape=none]".to_string(),
        ];

        let states = (0..self.size()).map(|q| {
            let shape = if self.is_accepting(q) {
                "doublecircle"
            } else {
                "circle"
            };
            format!("q{q} [label=\"q{q}\", shape={shape}]")
        });

        let initial = std::iter::once(format!("init -> q{}", self.initial()));

        let transitions = self
            .transitions()
            .map(|(q, sym, p)| ((q, p), sym))
            .into_group_map()
            .into_iter()
            .sorted()
            .map(|((q, p), symbols)| {
                let label = symbols.into_iter().map(|sym| sym.show()).join(", ");
                format!("q{q} -> q{p} [label=\"{}\"]", escape_label(&label))
            });

        header
            .into_iter()
            .chain(states)
            .chain(initial)
            .chain(transitions)
            .chain(std::iter::once("}".to_string()))
            .join("\n")
    }
}
