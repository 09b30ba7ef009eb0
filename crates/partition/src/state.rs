use indexmap::IndexMap;
use indexmap::map::Entry;
use querywire_compiler::CompileError;
use querywire_expr::{Expr, Parameter};
use querywire_types::{MemberRef, TypeRef};

/// Rendered text of the whole-entity leaf.
pub(crate) const ROOT_TEXT: &str = "this";

/// Per-call bookkeeping for one partition walk.
pub(crate) struct PartitionState<'s> {
    pub(crate) root: &'s Parameter,
    tuple_name: String,
    /// Rendered text -> leaf expression; the slot is the 1-based index.
    leaves: IndexMap<String, Expr>,
    causes: Vec<CompileError>,
}

impl<'s> PartitionState<'s> {
    pub(crate) fn new(root: &'s Parameter, tuple_name: String) -> Self {
        Self {
            root,
            tuple_name,
            leaves: IndexMap::new(),
            causes: Vec::new(),
        }
    }

    pub(crate) fn tuple_name(&self) -> &str {
        &self.tuple_name
    }

    /// The slot holding `text`, allocating the next one on first sight.
    pub(crate) fn slot_for(&mut self, text: String, leaf: &Expr) -> usize {
        let index = match self.leaves.entry(text) {
            Entry::Occupied(entry) => entry.index(),
            Entry::Vacant(entry) => {
                let index = entry.index();
                entry.insert(leaf.clone());
                index
            }
        };
        index + 1
    }

    /// The slot carrying the whole root entity.
    pub(crate) fn root_slot(&mut self) -> usize {
        let root = Expr::Parameter(self.root.clone());
        self.slot_for(ROOT_TEXT.to_string(), &root)
    }

    /// `ItemK` of the (not yet typed) tuple parameter.
    pub(crate) fn placeholder(&self, slot: usize, ty: TypeRef) -> Expr {
        Expr::MemberAccess {
            target: Some(Box::new(Expr::parameter(
                self.tuple_name.clone(),
                TypeRef::Tuple(Vec::new()),
            ))),
            member: MemberRef::new("Tuple", format!("Item{}", slot), ty),
        }
    }

    /// `ItemK` read back as `ty`. A slot shared by leaves of different types
    /// keeps the type of its first leaf and is converted on read.
    pub(crate) fn leaf_placeholder(&self, slot: usize, ty: TypeRef) -> Expr {
        let slot_ty = self
            .leaves
            .get_index(slot - 1)
            .map(|(_, leaf)| leaf.ty());
        match slot_ty {
            Some(slot_ty) if slot_ty != ty => Expr::convert(self.placeholder(slot, slot_ty), ty),
            _ => self.placeholder(slot, ty),
        }
    }

    pub(crate) fn record(&mut self, cause: CompileError) {
        self.causes.push(cause);
    }

    pub(crate) fn cause_count(&self) -> usize {
        self.causes.len()
    }

    pub(crate) fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Only the bare root parameter was collected.
    pub(crate) fn is_bare_root(&self) -> bool {
        self.leaves.len() == 1 && self.leaves.contains_key(ROOT_TEXT)
    }

    pub(crate) fn into_parts(self) -> (Vec<Expr>, Vec<CompileError>) {
        (self.leaves.into_values().collect(), self.causes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_one_based_and_deduplicated() {
        let root = Parameter::new("x", TypeRef::object());
        let mut state = PartitionState::new(&root, "t".to_string());
        let name = Expr::parameter("x", TypeRef::object()).property("Name", TypeRef::string());
        let price = Expr::parameter("x", TypeRef::object()).property("Price", TypeRef::double());

        assert_eq!(state.slot_for("name".to_string(), &name), 1);
        assert_eq!(state.slot_for("price".to_string(), &price), 2);
        assert_eq!(state.slot_for("name".to_string(), &name), 1);
        assert_eq!(state.leaf_count(), 2);

        let (leaves, causes) = state.into_parts();
        assert_eq!(leaves, vec![name, price]);
        assert!(causes.is_empty());
    }

    #[test]
    fn root_slot_is_shared() {
        let root = Parameter::new("x", TypeRef::object());
        let mut state = PartitionState::new(&root, "t".to_string());
        assert_eq!(state.root_slot(), 1);
        assert_eq!(state.slot_for(ROOT_TEXT.to_string(), &Expr::Parameter(root.clone())), 1);
        assert!(state.is_bare_root());
    }

    #[test]
    fn shared_slot_keeps_its_first_type() {
        let root = Parameter::new("x", TypeRef::object());
        let mut state = PartitionState::new(&root, "t".to_string());
        let reorder = Expr::parameter("x", TypeRef::object())
            .property("Reorder", TypeRef::nullable(TypeRef::int32()));
        let value = reorder.clone().property("Value", TypeRef::int32());

        assert_eq!(state.slot_for("reorder".to_string(), &reorder), 1);
        assert_eq!(state.slot_for("reorder".to_string(), &value), 1);

        let same = state.leaf_placeholder(1, reorder.ty());
        assert_eq!(same, state.placeholder(1, reorder.ty()));

        let unwrapped = state.leaf_placeholder(1, TypeRef::int32());
        assert_eq!(
            unwrapped,
            Expr::convert(state.placeholder(1, reorder.ty()), TypeRef::int32())
        );
        assert_eq!(unwrapped.ty(), TypeRef::int32());
    }
}
