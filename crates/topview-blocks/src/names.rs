const NAMESPACE: &str = "minecraft:";

/// Block kinds that are see-through when looking down a column.
const TRANSPARENT: [&str; 3] = ["air", "cave_air", "void_air"];

/// Strips the `minecraft:` namespace, leaving other namespaces intact.
#[inline]
pub fn normalize_block_name(name: &str) -> &str {
    name.strip_prefix(NAMESPACE).unwrap_or(name)
}

#[inline]
pub fn is_transparent(id: &str) -> bool {
    TRANSPARENT.contains(&normalize_block_name(id))
}
