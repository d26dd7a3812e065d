use std::collections::HashMap;
use std::hash::Hash;

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// A `Keymap` translates whatever the host uses to identify keys (e.g. scancodes)
/// into the 16 logical Chip-8 keys. It is built from a layout table where the
/// index of each host key is the logical key it produces, so rebinding is a
/// matter of swapping the table rather than the code.
#[derive(Clone, Debug)]
pub struct Keymap<K> {
    layout: [K; 16],
    lookup: HashMap<K, u8>,
}

impl<K: Copy + Eq + Hash> Keymap<K> {
    /// # Arguments
    /// * `layout` the host key for each logical key 0x0..=0xF; if a host key appears
    ///   more than once the highest logical key wins
    pub fn new(layout: [K; 16]) -> Self {
        let lookup = layout
            .iter()
            .enumerate()
            .map(|(key, host)| (*host, key as u8))
            .collect();
        Keymap { layout, lookup }
    }

    /// The logical key bound to `host`, if any
    pub fn key(&self, host: K) -> Option<u8> {
        self.lookup.get(&host).copied()
    }

    /// The host key bound to logical `key`
    pub fn host_key(&self, key: u8) -> Option<K> {
        self.layout.get(key as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: [char; 16] = [
        '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
    ];

    #[test]
    fn test_maps_host_keys() {
        let keymap = Keymap::new(HEX);
        assert_eq!(keymap.key('0'), Some(0x0));
        assert_eq!(keymap.key('b'), Some(0xB));
        assert_eq!(keymap.key('z'), None);
    }

    #[test]
    fn test_maps_logical_keys_back() {
        let keymap = Keymap::new(HEX);
        assert_eq!(keymap.host_key(0xC), Some('c'));
        assert_eq!(keymap.host_key(0x10), None);
    }
}
