// typed indices into Vec-backed arenas, so an NFA state index can't be used
// to look up a DFA state and vice versa
#[macro_export]
macro_rules! make_type_idx {
    ($vis:vis $type_idx_name:ident, $type_name:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis struct $type_idx_name(u32);

        impl $type_idx_name {
            pub(crate) fn new(index: usize) -> $type_idx_name {
                $type_idx_name(u32::try_from(index).expect("index should fit in u32"))
            }

            pub(crate) fn from_push(vec: &mut Vec<$type_name>, val: $type_name) -> $type_idx_name {
                let idx = $type_idx_name::new(vec.len());
                vec.push(val);
                idx
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::ops::Index<$type_idx_name> for [$type_name] {
            type Output = $type_name;

            fn index(&self, index: $type_idx_name) -> &Self::Output {
                &self[index.0 as usize]
            }
        }

        impl std::ops::IndexMut<$type_idx_name> for [$type_name] {
            fn index_mut(&mut self, index: $type_idx_name) -> &mut Self::Output {
                &mut self[index.0 as usize]
            }
        }

        impl std::ops::Index<$type_idx_name> for Vec<$type_name> {
            type Output = $type_name;

            fn index(&self, index: $type_idx_name) -> &Self::Output {
                std::ops::Index::index(self.as_slice(), index)
            }
        }

        impl std::ops::IndexMut<$type_idx_name> for Vec<$type_name> {
            fn index_mut(&mut self, index: $type_idx_name) -> &mut Self::Output {
                std::ops::IndexMut::index_mut(self.as_mut_slice(), index)
            }
        }
    };
}
