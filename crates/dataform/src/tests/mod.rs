mod arbitrary;
mod roundtrip;
