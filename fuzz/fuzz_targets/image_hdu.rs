#![no_main]

use libfuzzer_sys::fuzz_target;
use fitshdu::{Bitpix, ImageHdu, LayoutConfig};

// First byte picks the sample type, the next three the extents, the rest is raw data
// followed by appended planes.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let bitpix = match data[0] % 6 {
        0 => Bitpix::Int8,
        1 => Bitpix::Int16,
        2 => Bitpix::Int32,
        3 => Bitpix::Int64,
        4 => Bitpix::Float32,
        _ => Bitpix::Float64,
    };
    let dims = [usize::from(data[1] % 8), usize::from(data[2] % 8), usize::from(data[3] % 4)];
    let payload = &data[4..];

    for config in [LayoutConfig::strict(), LayoutConfig::legacy()] {
        let mut hdu = ImageHdu::new().with_config(config);
        let accepted = hdu.replace_raw(&dims, bitpix, payload.to_vec()).is_ok();
        if accepted && config.verify_raw_length {
            assert!(hdu.check_layout().is_ok());
        }

        if bitpix == Bitpix::Int8 {
            let before = hdu.clone();
            let plane: Vec<u8> = payload.iter().copied().take(dims[0] * dims[1]).collect();
            match hdu.append_channel(&plane) {
                Ok(()) if config.verify_raw_length => assert!(hdu.check_layout().is_ok()),
                Ok(()) => {}
                Err(_) => assert_eq!(hdu, before),
            }
        }
    }
});
