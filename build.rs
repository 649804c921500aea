fn main() {
    // Only the firmware binary is linked for the MCU; library tests stay on the host.
    println!("cargo:rustc-link-arg-bin=sleep-demo=--nmagic");
    println!("cargo:rustc-link-arg-bin=sleep-demo=-Tlink.x");
    println!("cargo:rustc-link-arg-bin=sleep-demo=-Tdefmt.x");
}
