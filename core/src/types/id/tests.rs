use super::*;

#[test]
fn id_bytes_roundtrip() {
    let id = RepositoryId::from_raw(42);

    let bytes = <RepositoryId as redb::Value>::as_bytes(&id);
    let id_from_bytes = <RepositoryId as redb::Value>::from_bytes(&bytes);

    assert_eq!(id, id_from_bytes);
}

#[test]
fn id_byte_order_matches_numeric_order() {
    const RAW: [u64; 5] = [0, 1, 255, 256, u64::MAX];

    for l in RAW.iter() {
        for r in RAW.iter() {
            let bytes_l = <RepositoryId as redb::Value>::as_bytes(&RepositoryId::from_raw(*l));
            let bytes_r = <RepositoryId as redb::Value>::as_bytes(&RepositoryId::from_raw(*r));
            assert_eq!(
                <RepositoryId as redb::Key>::compare(&bytes_l, &bytes_r),
                l.cmp(r),
                "Comparing {} and {}",
                l,
                r
            );
        }
    }
}

#[test]
fn id_display_is_opaque_number() {
    assert_eq!(RepositoryId::from_raw(7).to_string(), "#7");
}
