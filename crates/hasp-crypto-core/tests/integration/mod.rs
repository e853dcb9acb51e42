mod ccm_roundtrip;
