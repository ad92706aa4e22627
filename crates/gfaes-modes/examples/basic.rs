//! Decrypts a known CBC ciphertext, then seals and reopens a message in CTR mode.

use gfaes_modes::{decrypt, CipherOptions, Envelope, Mode, Strength};

fn main() {
    let key = hex::decode("140b41b22a29beb4061bda66b6747e14").unwrap();
    let ciphertext = hex::decode(
        "4ca00ff4c898d61e1edbf1800618fb2828a226d160dad07883d04e008a7897ee\
         2e4b7465d5290d0c0e6c6822236e1daafb94ffe0c5da05d9476be028ad7c1d81",
    )
    .unwrap();

    let options = CipherOptions::new(Strength::Aes128, Mode::Cbc);
    let plaintext = decrypt(&ciphertext, &key, &options).unwrap();
    println!("CBC -> {}", String::from_utf8_lossy(&plaintext));

    // Deterministic IV for reproducibility in the example.
    let iv = [7u8; 16];
    let ctr = CipherOptions::new(Strength::Aes128, Mode::Ctr);
    let envelope = Envelope::seal(&plaintext, &key, &iv, ctr).unwrap();
    let reopened = envelope.open(&key).unwrap();
    assert_eq!(reopened, plaintext);

    println!("example succeeded; CTR envelope round-trips");
}
