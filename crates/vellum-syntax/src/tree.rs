use std::fmt::Write as _;

use vellum_skip_tree::{Children, Cursor, Preorder, SkipTree};
use vellum_tokenizer::Source;
use vellum_tokenizer::text::token_range;

use crate::{Component, ComponentKind};

/// A parsed style sheet. The root is a `RULE_LIST`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentTree {
    tree: SkipTree<Component, u32>,
}

impl ComponentTree {
    pub fn new(tree: SkipTree<Component, u32>) -> Self {
        debug_assert!(
            tree.values().first().is_none_or(|root| root.kind == ComponentKind::RULE_LIST)
        );
        Self { tree }
    }

    pub fn skips(&self) -> &[u32] {
        self.tree.skips()
    }

    pub fn size(&self) -> u32 {
        self.tree.size()
    }

    pub fn components(&self) -> &[Component] {
        self.tree.values()
    }

    #[track_caller]
    pub fn get(&self, index: u32) -> Component {
        self.tree[index]
    }

    pub fn cursor(&self) -> Cursor<u32> {
        self.tree.cursor()
    }

    pub fn children(&self, index: u32) -> Children<'_, u32> {
        self.tree.children(index)
    }

    pub fn preorder(&self, index: u32) -> Preorder<'_, u32> {
        self.tree.preorder(index)
    }

    /// The rules of the root rule list.
    pub fn rules(&self) -> Children<'_, u32> {
        self.tree.children(0)
    }

    /// The `{}` block owned by the rule at `index`, if it has one.
    pub fn rule_block(&self, index: u32) -> Option<u32> {
        let component = self.get(index);
        (component.kind.is_rule() && component.extra != 0).then(|| index + component.extra)
    }

    /// The components of a rule before its block.
    pub fn prelude(&self, index: u32) -> Children<'_, u32> {
        let end = self.rule_block(index).unwrap_or(index + self.tree.skip(index));
        self.tree.siblings(Cursor::new(index + 1, end))
    }

    /// Renders the tree one node per line, indented by depth, with the raw
    /// text of every leaf.
    pub fn debug_dump(&self, source: &Source<'_>) -> String {
        let mut buf = String::new();
        for (index, depth) in self.preorder(0) {
            let component = self.get(index);
            let offset = u32::from(component.location.offset());
            _ = write!(buf, "{:indent$}{:?}@{offset}", "", component.kind, indent = depth * 2);
            if component.extra != 0 {
                _ = write!(buf, " extra={}", component.extra);
            }
            if !component.kind.is_composite() {
                let range = token_range(source, component.location);
                _ = write!(buf, " {:?}", &source.text()[range]);
            }
            buf.push('\n');
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use vellum_skip_tree::Builder;
    use vellum_tokenizer::Location;

    use super::*;

    /// `a b{c}` laid out by hand.
    fn rule_with_block() -> ComponentTree {
        let component = |kind, offset| Component::new(kind, Location::new(offset));
        let mut builder = Builder::new();
        builder.start_node(component(ComponentKind::RULE_LIST, 0)).unwrap();
        let rule = builder.start_node(component(ComponentKind::QUALIFIED_RULE, 0)).unwrap();
        builder.leaf(component(ComponentKind::IDENT, 0)).unwrap();
        builder.leaf(component(ComponentKind::WHITESPACE, 1)).unwrap();
        builder.leaf(component(ComponentKind::IDENT, 2)).unwrap();
        let block = builder.start_node(component(ComponentKind::SIMPLE_BLOCK_CURLY, 3)).unwrap();
        builder.leaf(component(ComponentKind::IDENT, 4)).unwrap();
        builder.finish_node();
        builder.value_mut(rule).extra = block - rule;
        builder.finish_node();
        builder.finish_node();
        ComponentTree::new(builder.finish())
    }

    #[test]
    fn rule_parts() {
        let tree = rule_with_block();
        assert_eq!(tree.skips(), &[7, 6, 1, 1, 1, 2, 1]);
        assert_eq!(tree.rules().collect::<Vec<_>>(), [1]);
        assert_eq!(tree.rule_block(1), Some(5));
        assert_eq!(tree.rule_block(2), None);
        assert_eq!(tree.prelude(1).collect::<Vec<_>>(), [2, 3, 4]);
    }

    #[test]
    fn dump() {
        let tree = rule_with_block();
        let source = Source::new("a b{c}").unwrap();
        assert_eq!(
            tree.debug_dump(&source),
            "RULE_LIST@0
  QUALIFIED_RULE@0 extra=4
    IDENT@0 \"a\"
    WHITESPACE@1 \" \"
    IDENT@2 \"b\"
    SIMPLE_BLOCK_CURLY@3
      IDENT@4 \"c\"
"
        );
    }
}
