binary_layout::binary_layout!(programming_frame_layout, BigEndian, {
    signature: [u8; 2],
    model_tag: [u8; 9],
    reserved_a: [u8; 2],
    serial_number: [u8; 3],
    start_address: u16,
    mode: u8,
    reserved_b: u8,
    device_const_a: [u8; 3],
    reserved_c: u8,
    device_const_b: [u8; 3],
    reserved_d: u8,
    preset_label: [u8; 8],
    reserved_e: [u8; 16],
    checksum: [u8; 2],
    channel_tail: [u8],
});
